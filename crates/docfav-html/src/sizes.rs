//! Filling in missing `sizes` attributes from the favicon files themselves.
//!
//! Everything here is best effort: a favicon that cannot be found, downloaded
//! or decoded keeps rendering, just without `sizes`.
use std::{
  fs,
  io::Cursor,
  path::{Component, Path, PathBuf},
  time::Duration,
};

use image::ImageReader;

use crate::{
  error::FaviconError,
  mime,
  resolve::{AssetSource, ResolvedFavicon},
};

/// Downloads remote favicons.
pub trait AssetFetcher: Send + Sync {
  /// Fetch the raw bytes behind `url`.
  ///
  /// # Errors
  ///
  /// Returns [`FaviconError::Fetch`] on connection failures and non-success
  /// responses.
  fn fetch(&self, url: &str) -> Result<Vec<u8>, FaviconError>;
}

/// Blocking HTTP fetcher backed by `ureq`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
  agent: ureq::Agent,
}

impl HttpFetcher {
  /// `timeout` bounds each download as a whole; `None` disables the limit.
  #[must_use]
  pub fn new(timeout: Option<Duration>) -> Self {
    let config = ureq::Agent::config_builder()
      .timeout_global(timeout)
      .build();
    Self {
      agent: ureq::Agent::new_with_config(config),
    }
  }
}

impl Default for HttpFetcher {
  fn default() -> Self {
    Self::new(None)
  }
}

impl AssetFetcher for HttpFetcher {
  fn fetch(&self, url: &str) -> Result<Vec<u8>, FaviconError> {
    let mut response = self
      .agent
      .get(url)
      .call()
      .map_err(|e| FaviconError::fetch(url, e))?;

    response
      .body_mut()
      .read_to_vec()
      .map_err(|e| FaviconError::fetch(url, e))
  }
}

/// Computes `sizes` for favicons that do not declare one.
pub struct SizeInference<'a> {
  search_dirs: Vec<PathBuf>,
  fetcher:     Option<&'a dyn AssetFetcher>,
}

impl<'a> SizeInference<'a> {
  /// `search_dirs` are the source directories of the static assets, looked
  /// up in order. Without a `fetcher`, remote favicons are left alone.
  #[must_use]
  pub const fn new(
    search_dirs: Vec<PathBuf>,
    fetcher: Option<&'a dyn AssetFetcher>,
  ) -> Self {
    Self {
      search_dirs,
      fetcher,
    }
  }

  /// Add a `sizes` attribute to `favicon` when it lacks one and its image can
  /// be measured. Failures are logged and leave the favicon unchanged.
  pub fn apply(&self, favicon: &mut ResolvedFavicon) {
    let descriptor = favicon.descriptor();
    if descriptor.is_meta() || descriptor.contains("sizes") {
      return;
    }

    let Some(source) = favicon.source() else {
      return;
    };

    match self.compute(source) {
      Ok(Some(sizes)) => {
        log::debug!(
          "docfav: computed sizes=\"{sizes}\" for `{}`",
          source.reference()
        );
        favicon.descriptor_mut().insert("sizes", sizes);
      },
      Ok(None) => {},
      Err(e) => {
        log::warn!("docfav: {e}. Size will not be computed.");
      },
    }
  }

  /// The `"{width}x{height}"` of the asset behind `source`.
  ///
  /// Returns `Ok(None)` for formats that cannot be measured and for remote
  /// assets when downloading is disabled.
  ///
  /// # Errors
  ///
  /// Returns an error if the asset cannot be located, read or decoded, or if
  /// a local reference uses `..` to leave the static paths.
  pub fn compute(
    &self,
    source: &AssetSource,
  ) -> Result<Option<String>, FaviconError> {
    let reference = source.reference();
    let Some(extension) =
      mime::extension(reference).filter(|ext| mime::is_measurable(ext))
    else {
      return Ok(None);
    };

    let bytes = match source {
      AssetSource::Remote(url) => {
        let Some(fetcher) = self.fetcher else {
          log::debug!("docfav: not downloading `{url}`, fetching is disabled");
          return Ok(None);
        };
        fetcher.fetch(url)?
      },
      AssetSource::Local(path) => {
        if Path::new(path)
          .components()
          .any(|c| matches!(c, Component::ParentDir))
        {
          return Err(FaviconError::OutsideStaticPath {
            reference: path.clone(),
          });
        }
        let file = self.find_local(path).ok_or_else(|| {
          FaviconError::NotInStaticPath {
            reference: path.clone(),
          }
        })?;
        fs::read(&file).map_err(|source| {
          FaviconError::ReadFile { path: file, source }
        })?
      },
    };

    let (width, height) = measure(&bytes, &extension, reference)?;
    Ok(Some(format!("{width}x{height}")))
  }

  /// First static directory containing `reference`.
  fn find_local(&self, reference: &str) -> Option<PathBuf> {
    self
      .search_dirs
      .iter()
      .map(|dir| dir.join(Path::new(reference)))
      .find(|candidate| candidate.is_file())
  }
}

/// Pixel dimensions of an encoded image.
///
/// SVG documents are measured by their viewport, rounded to whole pixels.
/// Raster formats are detected from their content rather than trusting the
/// extension.
///
/// # Errors
///
/// Returns [`FaviconError::Decode`] if the image cannot be parsed.
#[allow(
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss,
  reason = "usvg guarantees a positive, finite viewport"
)]
pub fn measure(
  bytes: &[u8],
  extension: &str,
  reference: &str,
) -> Result<(u32, u32), FaviconError> {
  if extension == "svg" {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
      .map_err(|e| FaviconError::decode(reference, e))?;
    let size = tree.size();
    return Ok((size.width().round() as u32, size.height().round() as u32));
  }

  ImageReader::new(Cursor::new(bytes))
    .with_guessed_format()
    .map_err(|e| FaviconError::decode(reference, e))?
    .into_dimensions()
    .map_err(|e| FaviconError::decode(reference, e))
}
