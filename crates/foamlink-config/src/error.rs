use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for foamlink-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),

  #[error("I/O error on {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },

  #[error("Failed to parse JSON config from {}: {source}", path.display())]
  Json {
    path:   PathBuf,
    source: serde_json::Error,
  },

  #[error("Failed to parse TOML config from {}: {source}", path.display())]
  Toml {
    path:   PathBuf,
    source: toml::de::Error,
  },
}
