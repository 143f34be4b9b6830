//! Configuration management for logpat

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub chunk: ChunkConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Source scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File with one watched call name per line
    #[serde(default = "default_names_file")]
    pub names_file: String,
    /// Buffered lines per call before the statement is abandoned
    #[serde(default = "default_max_statement_lines")]
    pub max_statement_lines: usize,
}

fn default_names_file() -> String {
    "log_call_names.txt".to_string()
}

fn default_max_statement_lines() -> usize {
    crate::scan::MAX_STATEMENT_LINES
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            names_file: default_names_file(),
            max_statement_lines: default_max_statement_lines(),
        }
    }
}

/// Token chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Token budget per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Trailing overlap window carried into the next chunk
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,
    /// Token budget per classifier batch
    #[serde(default = "default_batch_token_limit")]
    pub batch_token_limit: usize,
}

fn default_max_tokens() -> usize {
    2048
}

fn default_overlap_tokens() -> usize {
    50
}

fn default_batch_token_limit() -> usize {
    crate::batch::DEFAULT_BATCH_TOKEN_LIMIT
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap_tokens(),
            batch_token_limit: default_batch_token_limit(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default record format when `--format` is not given
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

fn default_format() -> OutputFormat {
    OutputFormat::Csv
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.config/logpat/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the config directory path (~/.config/logpat)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("logpat"))
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let config_dir = Self::config_dir()?;

        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.scan.max_statement_lines, 50);
        assert_eq!(config.chunk.max_tokens, 2048);
        assert_eq!(config.chunk.overlap_tokens, 50);
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[chunk]\nmax_tokens = 1024\n").unwrap();
        assert_eq!(config.chunk.max_tokens, 1024);
        assert_eq!(config.chunk.overlap_tokens, 50);
        assert_eq!(config.scan.names_file, "log_call_names.txt");
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.chunk.batch_token_limit, config.chunk.batch_token_limit);
        assert_eq!(parsed.output.format, config.output.format);
    }
}
