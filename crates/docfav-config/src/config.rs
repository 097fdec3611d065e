use std::{
  fs,
  path::{Path, PathBuf},
  time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{descriptor::FaviconsConfig, error::ConfigError};

/// Configuration for favicon tag generation.
///
/// [`Config`] bundles the favicon descriptors with the pieces of host state
/// the generator needs: where static assets live in the source tree and what
/// the static output directory is called. Fields are typically loaded from a
/// TOML or JSON config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Favicon descriptors, in output order.
  #[serde(skip_serializing_if = "FaviconsConfig::is_empty")]
  pub favicons: FaviconsConfig,

  /// Directories, relative to [`Self::confdir`], whose contents are copied
  /// verbatim into the static output directory.
  pub static_path: Vec<PathBuf>,

  /// Directory containing the documentation configuration.
  pub confdir: PathBuf,

  /// Name of the static asset directory in the build output.
  pub static_output_dir: String,

  /// Whether to compute missing `sizes` attributes from the image files.
  pub compute_sizes: bool,

  /// Whether size computation may download remote favicons.
  pub fetch_remote: bool,

  /// Timeout for downloading a remote favicon, in seconds.
  ///
  /// `None` waits for as long as the connection stays open.
  pub fetch_timeout_secs: Option<u64>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      favicons:           FaviconsConfig::None,
      static_path:        Vec::new(),
      confdir:            PathBuf::from("."),
      static_output_dir:  "_static".to_string(),
      compute_sizes:      true,
      fetch_remote:       true,
      fetch_timeout_secs: None,
    }
  }
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase);

    // Reject unknown formats before touching the filesystem
    if !matches!(extension.as_deref(), Some("json" | "toml")) {
      return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| {
      ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
      }
    })?;

    if extension.as_deref() == Some("json") {
      serde_json::from_str(&content).map_err(|source| {
        ConfigError::Json {
          path: path.to_path_buf(),
          source,
        }
      })
    } else {
      toml::from_str(&content).map_err(|source| {
        ConfigError::Toml {
          path: path.to_path_buf(),
          source,
        }
      })
    }
  }

  /// Source directories searched for local favicon files, in priority order.
  pub fn static_search_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
    self.static_path.iter().map(|dir| self.confdir.join(dir))
  }

  #[must_use]
  pub fn fetch_timeout(&self) -> Option<Duration> {
    self.fetch_timeout_secs.map(Duration::from_secs)
  }
}
