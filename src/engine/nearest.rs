//! Per-gene nearest non-overlapping transcript search.
//!
//! This is the pipeline's central step. The join output tells us which
//! transcripts fall inside at least one extended site window; here those
//! transcripts are partitioned by gene and, for every original (unextended)
//! site, the nearest transcript that does not overlap the site is selected
//! within each gene independently.
//!
//! Gene groups share no mutable state: each reads only its own transcript
//! subset and the shared read-only site set, so groups run in parallel and
//! their result lists are concatenated in group order afterwards.

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::engine::join::OverlapPair;
use crate::engine::set::IntervalSet;
use crate::types::{GenomicInterval, NearestResult};

/// Transcripts that reached the join output, partitioned by gene.
///
/// Within a gene, transcripts hit by several windows are deduplicated by
/// `transcript_id`. Pairs whose B-side carries no gene identifier cannot be
/// partitioned and are skipped.
fn group_by_gene(pairs: &[OverlapPair]) -> IndexMap<String, Vec<&GenomicInterval>> {
    let mut groups: IndexMap<String, Vec<&GenomicInterval>> = IndexMap::new();
    for pair in pairs {
        let Some(gene_id) = pair.b.gene_id() else {
            continue;
        };
        let group = groups.entry(gene_id.to_string()).or_default();
        let seen = group
            .iter()
            .any(|t| t.transcript_id() == pair.b.transcript_id());
        if !seen {
            group.push(&pair.b);
        }
    }
    groups
}

/// Nearest non-overlapping transcript to `site` among `transcripts`.
///
/// Candidates are restricted to transcripts on the site's chromosome with a
/// gap distance of at least 1; transcripts overlapping the site are dropped
/// entirely, not merely deprioritized. Ties on distance are broken by
/// lexically smallest `transcript_id`, which makes the selection independent
/// of input order.
fn nearest_candidate<'a>(
    site: &GenomicInterval,
    transcripts: &[&'a GenomicInterval],
) -> Option<(&'a GenomicInterval, i64)> {
    let mut best: Option<(&GenomicInterval, i64)> = None;
    for &t in transcripts {
        let Some(distance) = site.gap_distance(t) else {
            continue;
        };
        let closer = match best {
            None => true,
            Some((best_t, best_d)) => {
                distance < best_d
                    || (distance == best_d && t.transcript_id() < best_t.transcript_id())
            }
        };
        if closer {
            best = Some((t, distance));
        }
    }
    best
}

/// For every (site, gene) pair with a winning candidate, emit one
/// `NearestResult` tagged with that gene's identifier.
///
/// `sites` is the original, unextended site set, passed in explicitly and
/// read by every group computation. A site whose candidates all overlap it
/// (or an empty gene subset) contributes no result for that gene; empty
/// inputs yield empty output, never an error.
pub fn nearest_per_gene(pairs: &[OverlapPair], sites: &IntervalSet) -> Vec<NearestResult> {
    let groups: Vec<(String, Vec<&GenomicInterval>)> =
        group_by_gene(pairs).into_iter().collect();

    groups
        .par_iter()
        .map(|(gene_id, transcripts)| {
            let mut results = Vec::with_capacity(sites.len());
            for site in sites.intervals() {
                if let Some((nearest, distance)) = nearest_candidate(site, transcripts) {
                    results.push(NearestResult {
                        site: site.clone(),
                        nearest: nearest.clone(),
                        distance,
                        gene_id: gene_id.clone(),
                    });
                }
            }
            results
        })
        .flatten()
        .collect()
}
