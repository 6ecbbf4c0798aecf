//! Core data structures for isonear.
//!
//! This module contains the fundamental types used throughout the
//! nearest-transcript search: genomic intervals, strand orientation,
//! result records and the engine error kinds.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

/// Attribute key under which a transcript's gene identifier is stored,
/// regardless of the GTF tag it was parsed from.
pub const GENE_ID: &str = "gene_id";

/// Attribute key under which a transcript's own identifier is stored.
pub const TRANSCRIPT_ID: &str = "transcript_id";

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    Positive,
    Negative,
    #[default]
    Unknown,
}

impl Strand {
    /// Parse a strand symbol, mapping anything other than '+' or '-'
    /// (including '.') to `Unknown`.
    pub fn from_symbol(s: &str) -> Self {
        match s {
            "+" => Strand::Positive,
            "-" => Strand::Negative,
            _ => Strand::Unknown,
        }
    }

    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
            Strand::Unknown => ".",
        }
    }
}

impl FromStr for Strand {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Strand::from_symbol(s))
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error kinds raised by the engine.
///
/// `InvalidInterval` is raised at ingestion of any interval violating the
/// half-open invariant; `InvalidArgument` before any processing begins.
/// Empty inputs are never errors and propagate to empty outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// start >= end, or start < 0.
    InvalidInterval {
        chrom: String,
        start: i64,
        end: i64,
    },
    /// A parameter is out of range (negative extend distance, non-positive window).
    InvalidArgument(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInterval { chrom, start, end } => {
                write!(
                    f,
                    "invalid interval {}:{}-{}: expected 0 <= start < end",
                    chrom, start, end
                )
            }
            EngineError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

/// A genomic interval in 0-based half-open coordinates.
///
/// `start` is inclusive, `end` exclusive; the invariant `0 <= start < end`
/// holds for every constructed value. Attributes hold whatever metadata the
/// source record carried (BED name/score/strand, GTF gene and transcript IDs)
/// in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
    pub attributes: IndexMap<String, String>,
}

impl GenomicInterval {
    /// Create a new interval, validating the coordinate invariant.
    pub fn new(
        chrom: impl Into<String>,
        start: i64,
        end: i64,
        strand: Strand,
    ) -> Result<Self, EngineError> {
        let chrom = chrom.into();
        if start < 0 || start >= end {
            return Err(EngineError::InvalidInterval { chrom, start, end });
        }
        Ok(GenomicInterval {
            chrom,
            start,
            end,
            strand,
            attributes: IndexMap::new(),
        })
    }

    /// Attach an attribute, builder-style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Interval length in coordinate units.
    pub fn length(&self) -> i64 {
        self.end - self.start
    }

    /// Strict half-open overlap test. Chromosomes must match; strand never
    /// participates here.
    pub fn overlaps(&self, other: &GenomicInterval) -> bool {
        self.chrom == other.chrom && self.start < other.end && other.start < self.end
    }

    /// Gap between the closer edges of two non-overlapping intervals,
    /// floored at 1. Returns `None` when the intervals overlap (or sit on
    /// different chromosomes), so overlapping candidates are dropped rather
    /// than reported at distance zero.
    pub fn gap_distance(&self, other: &GenomicInterval) -> Option<i64> {
        if self.chrom != other.chrom || self.overlaps(other) {
            return None;
        }
        let gap = (other.start - self.end).max(self.start - other.end);
        Some(gap.max(1))
    }

    /// Gene identifier, present on every transcript interval.
    pub fn gene_id(&self) -> Option<&str> {
        self.attributes.get(GENE_ID).map(String::as_str)
    }

    /// Transcript identifier, present on every transcript interval.
    pub fn transcript_id(&self) -> Option<&str> {
        self.attributes.get(TRANSCRIPT_ID).map(String::as_str)
    }
}

/// The nearest non-overlapping transcript to one site within one gene.
///
/// `nearest` is drawn only from the gene named by `gene_id`, and
/// `distance >= 1` always holds: overlapping transcripts are excluded by
/// construction, never reported at distance zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestResult {
    pub site: GenomicInterval,
    pub nearest: GenomicInterval,
    pub distance: i64,
    pub gene_id: String,
}
