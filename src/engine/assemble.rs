//! Flattening of per-gene results into the final table.
//!
//! Concatenates the nearest-neighbor results from every gene group into one
//! sequence of flat rows. No deduplication happens here: a site equidistant
//! to transcripts of two genes legitimately produces two rows. Ordering is a
//! presentation concern handled downstream.

use crate::types::{NearestResult, Strand};

/// One row of the final result table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub chrom: String,
    pub site_start: i64,
    pub site_end: i64,
    pub transcript_start: i64,
    pub transcript_end: i64,
    pub transcript_strand: Strand,
    pub transcript_id: String,
    pub distance: i64,
    pub gene_id: String,
}

/// Assemble all gene-group results into flat output rows.
pub fn assemble(results: Vec<NearestResult>) -> Vec<OutputRow> {
    results
        .into_iter()
        .map(|r| OutputRow {
            chrom: r.site.chrom.clone(),
            site_start: r.site.start,
            site_end: r.site.end,
            transcript_start: r.nearest.start,
            transcript_end: r.nearest.end,
            transcript_strand: r.nearest.strand,
            transcript_id: r.nearest.transcript_id().unwrap_or_default().to_string(),
            distance: r.distance,
            gene_id: r.gene_id,
        })
        .collect()
}
