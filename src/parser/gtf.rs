//! GTF annotation reader with gzip support.
//!
//! Reads transcript records from GTF (Gene Transfer Format) files, keeping
//! only the configured feature type and gene type. The filtering happens
//! here, upstream of the engine: the engine never inspects feature or
//! gene-type fields, only coordinates, strand and the gene/transcript
//! identifiers. GTF's 1-based inclusive coordinates are converted to the
//! 0-based half-open convention used everywhere downstream.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use crate::config::Config;
use crate::engine::set::IntervalSet;
use crate::parser::util::create_buffered_reader;
use crate::types::{GenomicInterval, Strand, GENE_ID, TRANSCRIPT_ID};

/// Parse a GTF file into a transcript set, filtered per `config`.
///
/// Supports both plain text and gzip-compressed files.
pub fn parse_gtf(path: &Path, config: &Config) -> Result<IntervalSet> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open GTF file: {}", path.display()))?;
    let reader = create_buffered_reader(file, path);
    parse_gtf_reader(reader, config)
}

/// Parse GTF data from a reader.
pub fn parse_gtf_reader<R: BufRead>(reader: R, config: &Config) -> Result<IntervalSet> {
    let mut transcripts = Vec::new();

    for line_result in reader.lines() {
        let line = line_result.context("Failed to read GTF line")?;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 9 {
            continue;
        }

        if fields[2] != config.feature {
            continue;
        }

        let attributes = fields[8];
        match extract_attribute(attributes, "gene_type") {
            Some(gene_type) if gene_type == config.gene_type => {}
            _ => continue,
        }

        let gene_id = extract_attribute(attributes, &config.gene_id_tag)
            .with_context(|| format!("Transcript record without {}", config.gene_id_tag))?;
        let transcript_id = extract_attribute(attributes, &config.transcript_id_tag)
            .with_context(|| format!("Transcript record without {}", config.transcript_id_tag))?;

        let start: i64 = fields[3]
            .parse()
            .context("Failed to parse start coordinate")?;
        let end: i64 = fields[4].parse().context("Failed to parse end coordinate")?;
        let strand = Strand::from_symbol(fields[6]);

        // GTF is 1-based inclusive on both ends
        let transcript = GenomicInterval::new(fields[0], start - 1, end, strand)
            .with_context(|| format!("Malformed GTF record: {}:{}-{}", fields[0], start, end))?
            .with_attribute(GENE_ID, gene_id)
            .with_attribute(TRANSCRIPT_ID, transcript_id);

        transcripts.push(transcript);
    }

    Ok(IntervalSet::from_validated(transcripts))
}

/// Extract an attribute value from the GTF attributes column.
///
/// GTF attributes are in the format: key "value"; key "value"; ...
fn extract_attribute(attributes: &str, key: &str) -> Option<String> {
    let key_pattern = format!("{} ", key);
    let start_idx = attributes.find(&key_pattern)?;

    let after_key = &attributes[start_idx + key_pattern.len()..];
    let first_quote = after_key.find('"')?;
    let after_first_quote = &after_key[first_quote + 1..];
    let second_quote = after_first_quote.find('"')?;

    Some(after_first_quote[..second_quote].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_extract_attribute() {
        let attrs = r#"gene_id "ENSG00000279493.1"; transcript_id "ENST00000624081.1"; gene_type "protein_coding";"#;

        assert_eq!(
            extract_attribute(attrs, "gene_id"),
            Some("ENSG00000279493.1".to_string())
        );
        assert_eq!(
            extract_attribute(attrs, "transcript_id"),
            Some("ENST00000624081.1".to_string())
        );
        assert_eq!(
            extract_attribute(attrs, "gene_type"),
            Some("protein_coding".to_string())
        );
        assert_eq!(extract_attribute(attrs, "nonexistent"), None);
    }

    #[test]
    fn test_parse_gtf_keeps_protein_coding_transcripts() {
        let gtf = concat!(
            "##description: test\n",
            "chr1\tTEST\tgene\t1000\t2000\t.\t+\t.\tgene_id \"G1\"; gene_type \"protein_coding\";\n",
            "chr1\tTEST\ttranscript\t1000\t2000\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\"; gene_type \"protein_coding\";\n",
            "chr1\tTEST\texon\t1000\t1200\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\"; gene_type \"protein_coding\";\n",
            "chr1\tTEST\ttranscript\t3000\t4000\t.\t-\t.\tgene_id \"G2\"; transcript_id \"T2\"; gene_type \"lncRNA\";\n",
        );

        let config = Config::default();
        let transcripts =
            parse_gtf_reader(BufReader::new(gtf.as_bytes()), &config).unwrap();

        assert_eq!(transcripts.len(), 1);
        let t = &transcripts.intervals()[0];
        assert_eq!(t.gene_id(), Some("G1"));
        assert_eq!(t.transcript_id(), Some("T1"));
        assert_eq!(t.strand, Strand::Positive);
        // 1-based inclusive 1000-2000 becomes half-open 999-2000
        assert_eq!(t.start, 999);
        assert_eq!(t.end, 2000);
    }

    #[test]
    fn test_parse_gtf_custom_tags() {
        let gtf = "chr1\tTEST\ttranscript\t1000\t2000\t.\t+\t.\tgene \"G1\"; tx \"T1\"; gene_type \"protein_coding\";\n";

        let mut config = Config::default();
        config.gene_id_tag = "gene".to_string();
        config.transcript_id_tag = "tx".to_string();

        let transcripts =
            parse_gtf_reader(BufReader::new(gtf.as_bytes()), &config).unwrap();
        assert_eq!(transcripts.len(), 1);
        assert_eq!(transcripts.intervals()[0].gene_id(), Some("G1"));
        assert_eq!(transcripts.intervals()[0].transcript_id(), Some("T1"));
    }

    #[test]
    fn test_parse_gtf_missing_gene_type_skipped() {
        let gtf = "chr1\tTEST\ttranscript\t1000\t2000\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";\n";
        let config = Config::default();
        let transcripts =
            parse_gtf_reader(BufReader::new(gtf.as_bytes()), &config).unwrap();
        assert!(transcripts.is_empty());
    }

    #[test]
    fn test_parse_gtf_empty_input() {
        let config = Config::default();
        let transcripts =
            parse_gtf_reader(BufReader::new("".as_bytes()), &config).unwrap();
        assert!(transcripts.is_empty());
    }
}
