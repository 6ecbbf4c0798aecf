//! BED site reader with gzip support.
//!
//! Reads query sites from BED (Browser Extensible Data) files. Only the
//! first three columns are required; name, score and strand are captured as
//! attributes when present. Header and blank lines are skipped, but a line
//! whose coordinates parse and violate the half-open invariant fails fast.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use crate::engine::set::IntervalSet;
use crate::parser::util::create_buffered_reader;
use crate::types::{GenomicInterval, Strand};

/// Optional BED columns carried into site attributes.
const META_COLUMNS: [&str; 2] = ["name", "score"];

/// Parse a BED file into a site set.
///
/// Supports both plain text and gzip-compressed files.
pub fn parse_bed(path: &Path) -> Result<IntervalSet> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open BED file: {}", path.display()))?;
    let reader = create_buffered_reader(file, path);
    parse_bed_reader(reader)
}

/// Parse BED data from a reader.
pub fn parse_bed_reader<R: BufRead>(reader: R) -> Result<IntervalSet> {
    let mut sites = Vec::new();

    for line_result in reader.lines() {
        let line = line_result.context("Failed to read BED line")?;
        let trimmed = line.trim_end();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("track") {
            continue;
        }

        let fields: Vec<&str> = trimmed.split('\t').collect();
        if fields.len() < 3 {
            continue;
        }

        // Lines whose coordinates do not parse as integers are headers
        let (Ok(start), Ok(end)) = (fields[1].parse::<i64>(), fields[2].parse::<i64>()) else {
            continue;
        };

        let strand = fields
            .get(5)
            .copied()
            .map(Strand::from_symbol)
            .unwrap_or_default();

        let mut site = GenomicInterval::new(fields[0], start, end, strand)
            .with_context(|| format!("Malformed BED record: {}", trimmed))?;
        for (key, value) in META_COLUMNS.iter().zip(fields.iter().skip(3)) {
            site.attributes.insert(key.to_string(), value.to_string());
        }
        if let Some(s) = fields.get(5) {
            site.attributes.insert("strand".to_string(), s.to_string());
        }

        sites.push(site);
    }

    Ok(IntervalSet::from_validated(sites))
}
