//! Configuration and defaults for isonear.
//!
//! This module contains the configuration structure and default values
//! that control the window-based nearest-transcript search.

use crate::types::EngineError;

/// Default window size in coordinate units (100 kb).
pub const DEFAULT_WINDOW: i64 = 100_000;

/// Configuration for the nearest-transcript search.
#[derive(Debug, Clone)]
pub struct Config {
    /// Distance by which sites are extended on both sides before the
    /// transcript join (the candidate window).
    pub window: i64,
    /// Require matching strand in the overlap join. Sites are
    /// strand-agnostic by default.
    pub match_strand: bool,
    /// GTF feature type to keep (everything else is dropped upstream).
    pub feature: String,
    /// GTF gene_type value to keep.
    pub gene_type: String,
    /// GTF tag for gene ID.
    pub gene_id_tag: String,
    /// GTF tag for transcript ID.
    pub transcript_id_tag: String,
    /// Number of worker threads (0 = auto-detect).
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window: DEFAULT_WINDOW,
            match_strand: false,
            feature: "transcript".to_string(),
            gene_type: "protein_coding".to_string(),
            gene_id_tag: "gene_id".to_string(),
            transcript_id_tag: "transcript_id".to_string(),
            threads: 0,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size, rejecting non-positive values before any
    /// processing begins.
    pub fn set_window(&mut self, window: i64) -> Result<(), EngineError> {
        if window <= 0 {
            return Err(EngineError::InvalidArgument(format!(
                "window size must be positive, got {}",
                window
            )));
        }
        self.window = window;
        Ok(())
    }

    /// Resolved worker thread count.
    pub fn num_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}
