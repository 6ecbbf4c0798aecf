//! Shared helpers for the input readers.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Creates a buffered reader that transparently decompresses `.gz` files.
pub fn create_buffered_reader(file: File, path: &Path) -> Box<dyn BufRead + Send> {
    if path.to_string_lossy().ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}
