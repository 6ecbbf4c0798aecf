//! isonear - per-gene nearest-transcript search for genomic sites.
//!
//! Given a set of query sites (BED) and a transcript annotation (GTF), this
//! library reports, for every gene with a transcript within a bounded window
//! of a site, the transcript of that gene nearest to the site that does not
//! overlap it.
//!
//! # Pipeline
//!
//! 1. Extend sites by the window size and merge overlapping windows
//! 2. Join merged windows against transcripts on overlap
//! 3. Partition joined transcripts by gene and find, per gene, the nearest
//!    non-overlapping transcript to each original site
//! 4. Flatten per-gene results into one table
//!
//! # Example
//!
//! ```ignore
//! use isonear::config::Config;
//! use isonear::engine::{assemble, join, nearest_per_gene};
//! use isonear::parser::{parse_bed, parse_gtf};
//! use std::path::Path;
//!
//! let config = Config::default();
//! let transcripts = parse_gtf(Path::new("annotation.gtf.gz"), &config)?;
//! let sites = parse_bed(Path::new("sites.bed"))?;
//!
//! let windows = sites.extend(config.window)?.merge(true);
//! let pairs = join(&windows, &transcripts, config.match_strand);
//! let rows = assemble(nearest_per_gene(&pairs, &sites));
//! ```

pub mod config;
pub mod engine;
pub mod output;
pub mod parser;
pub mod types;

pub use config::Config;
pub use engine::{assemble, join, nearest_per_gene, IntervalSet, OutputRow, OverlapPair};
pub use types::{EngineError, GenomicInterval, NearestResult, Strand};
