use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for docfav-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The configuration file could not be read from disk.
  #[error("failed to read config file `{path}`: {source}")]
  ReadFile {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse JSON config `{path}`: {source}")]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to parse TOML config `{path}`: {source}")]
  Toml {
    path:   PathBuf,
    #[source]
    source: toml::de::Error,
  },

  /// The file extension is neither `.toml` nor `.json`.
  #[error("unsupported config file format: `{0}`")]
  UnsupportedFormat(PathBuf),
}
