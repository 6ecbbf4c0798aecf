//! Output formatting for isonear results.
//!
//! The engine guarantees no ordering of its own; this module imposes the
//! presentation order (natural chromosome order, then site start, then site
//! end) and renders the result table as tab-separated text.

use anyhow::Result;
use std::cmp::Ordering;
use std::io::Write;

use crate::engine::assemble::OutputRow;

/// Write the output header.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "Chromosome\tStart\tEnd\tTranscript_Start\tTranscript_End\tTranscript_Strand\tTranscript_ID\tTranscript_Distance\tGene_ID"
    )?;
    Ok(())
}

/// Format a single output row.
pub fn format_row(row: &OutputRow) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        row.chrom,
        row.site_start,
        row.site_end,
        row.transcript_start,
        row.transcript_end,
        row.transcript_strand,
        row.transcript_id,
        row.distance,
        row.gene_id
    )
}

/// Sort rows for presentation: natural chromosome order, site start, site
/// end, then gene and transcript IDs so equal sites order reproducibly.
pub fn sort_rows(rows: &mut [OutputRow]) {
    rows.sort_by(|a, b| {
        natural_cmp(&a.chrom, &b.chrom)
            .then(a.site_start.cmp(&b.site_start))
            .then(a.site_end.cmp(&b.site_end))
            .then(a.gene_id.cmp(&b.gene_id))
            .then(a.transcript_id.cmp(&b.transcript_id))
    });
}

/// Sort rows and write them with a header.
pub fn write_results<W: Write>(writer: &mut W, mut rows: Vec<OutputRow>) -> Result<usize> {
    sort_rows(&mut rows);
    write_header(writer)?;
    for row in &rows {
        writeln!(writer, "{}", format_row(row))?;
    }
    Ok(rows.len())
}

/// Compare two strings with embedded numbers compared numerically, so that
/// chr2 orders before chr10.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ia = a.chars().peekable();
    let mut ib = b.chars().peekable();

    loop {
        match (ia.peek().copied(), ib.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let na = take_number(&mut ia);
                    let nb = take_number(&mut ib);
                    match na.cmp(&nb) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    match ca.cmp(&cb) {
                        Ordering::Equal => {
                            ia.next();
                            ib.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

/// Consume a run of digits, comparing by stripped length then digits so
/// arbitrarily long runs never overflow.
fn take_number(iter: &mut std::iter::Peekable<std::str::Chars<'_>>) -> (usize, String) {
    let mut digits = String::new();
    while let Some(c) = iter.peek() {
        if c.is_ascii_digit() {
            digits.push(*c);
            iter.next();
        } else {
            break;
        }
    }
    let stripped = digits.trim_start_matches('0').to_string();
    (stripped.len(), stripped)
}
