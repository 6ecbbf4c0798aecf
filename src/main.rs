//! CLI entry point for isonear.
//!
//! Wires the readers, the interval engine and the output formatter together.
//! Progress goes to stderr; the result table goes to the output file or
//! stdout.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use isonear::config::{Config, DEFAULT_WINDOW};
use isonear::engine::{assemble, join, nearest_per_gene};
use isonear::output::write_results;
use isonear::parser::{parse_bed, parse_gtf};

/// Per-gene nearest-transcript finder.
///
/// Reports, for each site in a BED file, the nearest non-overlapping
/// transcript of every gene whose transcripts fall within a window around
/// the site.
#[derive(Parser, Debug)]
#[command(name = "isonear")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GTF annotation file (plain or .gz)
    #[arg(short = 'g', long = "gtf")]
    gtf: PathBuf,

    /// Site BED file (plain or .gz)
    #[arg(short = 'b', long = "bed")]
    bed: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Window size around each site in bp
    #[arg(short = 'w', long = "window", default_value_t = DEFAULT_WINDOW)]
    window: i64,

    /// Require matching strand between site and transcript
    #[arg(long = "match-strand")]
    match_strand: bool,

    /// GTF gene_type value to keep
    #[arg(long = "gene-type", default_value = "protein_coding")]
    gene_type: String,

    /// GTF feature type to keep
    #[arg(long = "feature", default_value = "transcript")]
    feature: String,

    /// GTF tag for gene ID
    #[arg(short = 'G', long = "gene", default_value = "gene_id")]
    gene_tag: String,

    /// GTF tag for transcript ID
    #[arg(short = 'T', long = "transcript", default_value = "transcript_id")]
    transcript_tag: String,

    /// Number of worker threads (0 = auto-detect)
    #[arg(short = 'j', long = "threads", default_value = "0")]
    threads: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.gtf.exists() {
        bail!("GTF file not found: {}", args.gtf.display());
    }
    if !args.bed.exists() {
        bail!("BED file not found: {}", args.bed.display());
    }

    let mut config = Config::new();
    config
        .set_window(args.window)
        .context("The window size must be a positive number of bps")?;
    config.match_strand = args.match_strand;
    config.gene_type = args.gene_type.clone();
    config.feature = args.feature.clone();
    config.gene_id_tag = args.gene_tag.clone();
    config.transcript_id_tag = args.transcript_tag.clone();
    config.threads = args.threads;

    eprintln!("Reading annotations from: {}", args.gtf.display());
    let transcripts = parse_gtf(&args.gtf, &config)?;
    eprintln!("Kept {} transcripts", transcripts.len());

    eprintln!("Reading sites from: {}", args.bed.display());
    let sites = parse_bed(&args.bed)?;
    eprintln!("Read {} sites", sites.len());

    eprintln!("Extending site regions by {}bp...", config.window);
    let windows = sites.extend(config.window)?.merge(true);

    eprintln!("Finding transcripts that overlap extended site regions...");
    let pairs = join(&windows, &transcripts, config.match_strand);

    eprintln!("Finding per-gene transcripts nearest to original sites...");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads())
        .build()
        .context("Failed to create thread pool")?;
    let results = pool.install(|| nearest_per_gene(&pairs, &sites));

    let rows = assemble(results);

    let lines = match &args.output {
        Some(path) => {
            eprintln!("Writing results to: {}", path.display());
            let file = File::create(path).context("Failed to create output file")?;
            let mut writer = BufWriter::new(file);
            let lines = write_results(&mut writer, rows)?;
            writer.flush()?;
            lines
        }
        None => {
            eprintln!("Writing results to stdout...");
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let lines = write_results(&mut writer, rows)?;
            writer.flush()?;
            lines
        }
    };

    eprintln!("Done! ({} result rows)", lines);
    Ok(())
}
