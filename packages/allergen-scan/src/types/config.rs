//! Pipeline configuration.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Configuration for one scanner instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum characters per text segment sent to the classifier.
    ///
    /// A single paragraph longer than this is still sent whole.
    /// Default: 3500.
    pub chunk_size: usize,

    /// Trailing paragraphs of the previous segment repeated at the start of
    /// the next one.
    ///
    /// Default: 2.
    pub chunk_overlap: usize,

    /// Segments classified at the same time.
    ///
    /// Results are always combined in segment order. Default: 1 (sequential).
    pub max_concurrent_segments: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 3500,
            chunk_overlap: 2,
            max_concurrent_segments: 1,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from the environment (and `.env` if present).
    ///
    /// Reads `ALLERGEN_SCAN_CHUNK_SIZE`, `ALLERGEN_SCAN_CHUNK_OVERLAP` and
    /// `ALLERGEN_SCAN_CONCURRENCY`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Ok(Self {
            chunk_size: env_usize("ALLERGEN_SCAN_CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: env_usize("ALLERGEN_SCAN_CHUNK_OVERLAP", defaults.chunk_overlap)?,
            max_concurrent_segments: env_usize(
                "ALLERGEN_SCAN_CONCURRENCY",
                defaults.max_concurrent_segments,
            )?,
        })
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn with_chunk_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }

    /// Set segment concurrency (clamped to at least 1).
    pub fn with_max_concurrent_segments(mut self, n: usize) -> Self {
        self.max_concurrent_segments = n.max(1);
        self
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|e| {
            ScanError::Config(format!("{} must be a non-negative integer: {}", key, e).into())
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.chunk_size, 3500);
        assert_eq!(config.chunk_overlap, 2);
        assert_eq!(config.max_concurrent_segments, 1);
    }

    #[test]
    fn test_builder_clamps_concurrency() {
        let config = PipelineConfig::new()
            .with_chunk_size(100)
            .with_chunk_overlap(0)
            .with_max_concurrent_segments(0);

        assert_eq!(config.chunk_size, 100);
        assert_eq!(config.chunk_overlap, 0);
        assert_eq!(config.max_concurrent_segments, 1);
    }

    #[test]
    fn test_env_usize_rejects_garbage() {
        env::set_var("ALLERGEN_SCAN_TEST_GARBAGE", "lots");
        assert!(env_usize("ALLERGEN_SCAN_TEST_GARBAGE", 1).is_err());
        assert_eq!(env_usize("ALLERGEN_SCAN_TEST_UNSET", 7).unwrap(), 7);
    }
}
