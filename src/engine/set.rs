//! Interval container with coordinate-space transforms.
//!
//! An `IntervalSet` validates every interval at ingestion and provides the
//! two geometric operations the pipeline needs before the transcript join:
//! symmetric extension and overlap-merging.

use ahash::AHashMap;

use crate::types::{EngineError, GenomicInterval, Strand};

/// An ordered collection of validated genomic intervals.
///
/// All operations are pure: they produce new sets rather than mutating
/// inputs.
#[derive(Debug, Clone, Default)]
pub struct IntervalSet {
    intervals: Vec<GenomicInterval>,
}

impl IntervalSet {
    /// Build a set from intervals, re-checking the coordinate invariant.
    ///
    /// Fails fast with `InvalidInterval` on the first malformed interval so
    /// bad records never reach the filter stages.
    pub fn new(intervals: Vec<GenomicInterval>) -> Result<Self, EngineError> {
        for iv in &intervals {
            if iv.start < 0 || iv.start >= iv.end {
                return Err(EngineError::InvalidInterval {
                    chrom: iv.chrom.clone(),
                    start: iv.start,
                    end: iv.end,
                });
            }
        }
        Ok(IntervalSet { intervals })
    }

    /// Build a set from intervals already known to satisfy the invariant
    /// (`GenomicInterval::new` validated them at construction).
    pub fn from_validated(intervals: Vec<GenomicInterval>) -> Self {
        IntervalSet { intervals }
    }

    pub fn intervals(&self) -> &[GenomicInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Extend every interval by `distance` on both sides.
    ///
    /// The left edge is clamped at 0. The right edge is not clamped:
    /// chromosome lengths are not modeled, so windows may run off the end of
    /// a chromosome and the caller accepts this.
    pub fn extend(&self, distance: i64) -> Result<IntervalSet, EngineError> {
        if distance < 0 {
            return Err(EngineError::InvalidArgument(format!(
                "extend distance must be non-negative, got {}",
                distance
            )));
        }
        let extended = self
            .intervals
            .iter()
            .map(|iv| {
                let mut out = iv.clone();
                out.start = (iv.start - distance).max(0);
                out.end = iv.end + distance;
                out
            })
            .collect();
        Ok(IntervalSet { intervals: extended })
    }

    /// Merge positionally overlapping intervals into single spans.
    ///
    /// Intervals are grouped by chromosome (and by strand too when
    /// `ignore_strand` is false), sorted by (start, end), then combined in a
    /// left-to-right sweep: an interval whose start is `<=` the running
    /// maximum end joins the current cluster, extending its end.
    ///
    /// Merge is a lossy geometric reduction: output spans carry no
    /// attributes, so callers that need source metadata must join merged
    /// spans back to their sources afterward. The operation is idempotent.
    pub fn merge(&self, ignore_strand: bool) -> IntervalSet {
        let mut groups: AHashMap<(String, Option<Strand>), Vec<&GenomicInterval>> =
            AHashMap::new();
        for iv in &self.intervals {
            let key = if ignore_strand {
                (iv.chrom.clone(), None)
            } else {
                (iv.chrom.clone(), Some(iv.strand))
            };
            groups.entry(key).or_default().push(iv);
        }

        let mut merged = Vec::with_capacity(self.intervals.len());
        for ((chrom, strand), mut group) in groups {
            group.sort_by_key(|iv| (iv.start, iv.end));
            let out_strand = strand.unwrap_or(Strand::Unknown);

            let mut iter = group.into_iter();
            let first = match iter.next() {
                Some(iv) => iv,
                None => continue,
            };
            let mut cur_start = first.start;
            let mut cur_end = first.end;

            for iv in iter {
                if iv.start <= cur_end {
                    cur_end = cur_end.max(iv.end);
                } else {
                    merged.push(Self::span(&chrom, cur_start, cur_end, out_strand));
                    cur_start = iv.start;
                    cur_end = iv.end;
                }
            }
            merged.push(Self::span(&chrom, cur_start, cur_end, out_strand));
        }

        // Deterministic output order across the hash-grouped chromosomes
        merged.sort_by(|a, b| {
            a.chrom
                .cmp(&b.chrom)
                .then(a.start.cmp(&b.start))
                .then(a.end.cmp(&b.end))
        });
        IntervalSet { intervals: merged }
    }

    fn span(chrom: &str, start: i64, end: i64, strand: Strand) -> GenomicInterval {
        GenomicInterval {
            chrom: chrom.to_string(),
            start,
            end,
            strand,
            attributes: Default::default(),
        }
    }
}
