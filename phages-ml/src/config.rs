//! Pipeline configuration.

use phages_core::{PhagesError, Result};
use phages_seq::{Alphabet, KmerExtractor, DEFAULT_K};

use crate::parallel::WorkPool;

/// Settings for k-mer extraction and batch execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct PipelineConfig {
    /// K-mer size.
    pub k: usize,
    /// Characters accepted inside a k-mer.
    pub alphabet: Alphabet,
    /// Worker threads for batch transforms (1 = sequential).
    pub threads: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            alphabet: Alphabet::Dna,
            threads: 1,
        }
    }
}

impl PipelineConfig {
    /// Check that `k` and `threads` are usable.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(PhagesError::InvalidInput("k must be at least 1".into()));
        }
        if self.threads == 0 {
            return Err(PhagesError::InvalidInput(
                "threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The extractor described by this configuration.
    pub fn extractor(&self) -> Result<KmerExtractor> {
        KmerExtractor::with_alphabet(self.k, self.alphabet)
    }

    /// A work pool sized by `threads`.
    pub fn work_pool(&self) -> Result<WorkPool> {
        WorkPool::with_threads(self.threads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.k, 6);
        assert_eq!(config.alphabet, Alphabet::Dna);
        assert_eq!(config.threads, 1);
        assert!(config.validate().is_ok());
        assert_eq!(config.extractor().unwrap(), KmerExtractor::default());
    }

    #[test]
    fn invalid_values() {
        let config = PipelineConfig {
            k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.extractor().is_err());

        let config = PipelineConfig {
            threads: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.work_pool().is_err());
    }
}
