//! Pipeline settings from an optional TOML file plus command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use phages_ml::PipelineConfig;
use phages_seq::Alphabet;

/// Flags that override values from the config file when given.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub k: Option<usize>,
    pub alphabet: Option<Alphabet>,
    pub threads: Option<usize>,
}

/// Parse a TOML document such as:
///
/// ```toml
/// k = 6
/// alphabet = "dna"
/// threads = 8
/// ```
///
/// Missing keys keep their defaults.
pub fn parse_config(text: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig = toml::from_str(text).context("invalid pipeline config")?;
    Ok(config)
}

/// Load the config file if one is given, apply overrides and validate.
pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse_config(&text).with_context(|| format!("in {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(k) = overrides.k {
        config.k = k;
    }
    if let Some(alphabet) = overrides.alphabet {
        config.alphabet = alphabet;
    }
    if let Some(threads) = overrides.threads {
        config.threads = threads;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config("threads = 4\n").unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.k, 6);
        assert_eq!(config.alphabet, Alphabet::Dna);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(parse_config("kmer = 6\n").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "k = 4\nalphabet = \"rna\"\nthreads = 2").unwrap();
        file.flush().unwrap();

        let config = resolve(
            Some(file.path()),
            Overrides {
                k: Some(8),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.k, 8);
        assert_eq!(config.alphabet, Alphabet::Rna);
        assert_eq!(config.threads, 2);
    }

    #[test]
    fn invalid_result_rejected() {
        let overrides = Overrides {
            threads: Some(0),
            ..Default::default()
        };
        assert!(resolve(None, overrides).is_err());
    }

    #[test]
    fn missing_file_rejected() {
        assert!(resolve(Some(Path::new("/nonexistent/phages.toml")), Overrides::default()).is_err());
    }
}
