use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

/// Write a small GTF + BED fixture pair into `dir` and return their paths.
///
/// The GTF uses 1-based inclusive coordinates; the site in the BED is the
/// 48nt region chr1:10,000,000-10,000,048 (0-based half-open).
fn write_fixtures(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let gtf_path = dir.path().join("annotation.gtf");
    let bed_path = dir.path().join("sites.bed");

    let mut gtf = fs::File::create(&gtf_path).unwrap();
    let records = [
        // GENE1: T1 ends 100bp left of the site, T2 starts 52bp right of it
        ("chr1", 9_999_001, 9_999_900, "+", "GENE1", "T1", "protein_coding"),
        ("chr1", 10_000_101, 10_000_300, "+", "GENE1", "T2", "protein_coding"),
        // GENE2: single transcript tying GENE1's T2 at distance 52
        ("chr1", 10_000_101, 10_000_500, "-", "GENE2", "T9", "protein_coding"),
        // Non-coding transcript even closer: must be filtered upstream
        ("chr1", 10_000_050, 10_000_090, "+", "GENE3", "T7", "lncRNA"),
        // chr2 transcript, no site on that chromosome
        ("chr2", 5_000_000, 5_001_000, "+", "GENE4", "T8", "protein_coding"),
    ];
    for (chrom, start, end, strand, gene, tx, gtype) in records {
        writeln!(
            gtf,
            "{}\tHAVANA\ttranscript\t{}\t{}\t.\t{}\t.\tgene_id \"{}\"; transcript_id \"{}\"; gene_type \"{}\";",
            chrom, start, end, strand, gene, tx, gtype
        )
        .unwrap();
    }

    let mut bed = fs::File::create(&bed_path).unwrap();
    writeln!(bed, "chr1\t10000000\t10000048").unwrap();

    (gtf_path, bed_path)
}

#[test]
fn reports_nearest_isoform_per_gene() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let (gtf_path, bed_path) = write_fixtures(&dir);
    let output_path = dir.path().join("out.tsv");

    Command::new(env!("CARGO_BIN_EXE_isonear"))
        .arg("-g")
        .arg(&gtf_path)
        .arg("-b")
        .arg(&bed_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let output = fs::read_to_string(&output_path)?;
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[0],
        "Chromosome\tStart\tEnd\tTranscript_Start\tTranscript_End\tTranscript_Strand\tTranscript_ID\tTranscript_Distance\tGene_ID"
    );
    // One row per gene near the site: GENE1 picks T2 over T1, GENE2 ties at
    // the same distance and appears separately. The lncRNA and the chr2
    // transcript never show up.
    assert_eq!(
        lines[1],
        "chr1\t10000000\t10000048\t10000100\t10000300\t+\tT2\t52\tGENE1"
    );
    assert_eq!(
        lines[2],
        "chr1\t10000000\t10000048\t10000100\t10000500\t-\tT9\t52\tGENE2"
    );
    assert_eq!(lines.len(), 3);

    Ok(())
}

#[test]
fn empty_annotation_produces_header_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let gtf_path = dir.path().join("empty.gtf");
    let bed_path = dir.path().join("sites.bed");
    let output_path = dir.path().join("out.tsv");

    fs::write(&gtf_path, "##empty annotation\n")?;
    fs::write(&bed_path, "chr1\t10000000\t10000048\n")?;

    Command::new(env!("CARGO_BIN_EXE_isonear"))
        .arg("-g")
        .arg(&gtf_path)
        .arg("-b")
        .arg(&bed_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let output = fs::read_to_string(&output_path)?;
    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("Chromosome\t"));

    Ok(())
}

#[test]
fn rejects_non_positive_window() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let (gtf_path, bed_path) = write_fixtures(&dir);

    Command::new(env!("CARGO_BIN_EXE_isonear"))
        .arg("-g")
        .arg(&gtf_path)
        .arg("-b")
        .arg(&bed_path)
        .arg("-w")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("window size"));

    Ok(())
}

#[test]
fn rejects_missing_input_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let (_, bed_path) = write_fixtures(&dir);

    Command::new(env!("CARGO_BIN_EXE_isonear"))
        .arg("-g")
        .arg(dir.path().join("nope.gtf"))
        .arg("-b")
        .arg(&bed_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GTF file not found"));

    Ok(())
}

#[test]
fn narrow_window_excludes_far_transcripts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let (gtf_path, bed_path) = write_fixtures(&dir);
    let output_path = dir.path().join("out.tsv");

    // A 10bp window reaches neither T1 (100 away) nor T2 (52 away)
    Command::new(env!("CARGO_BIN_EXE_isonear"))
        .arg("-g")
        .arg(&gtf_path)
        .arg("-b")
        .arg(&bed_path)
        .arg("-o")
        .arg(&output_path)
        .arg("-w")
        .arg("10")
        .assert()
        .success();

    let output = fs::read_to_string(&output_path)?;
    assert_eq!(output.lines().count(), 1);

    Ok(())
}
