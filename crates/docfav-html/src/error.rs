use std::{io, path::PathBuf};

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while turning a favicon descriptor into a tag.
///
/// None of these abort a page render: the pipeline logs them and drops
/// either the affected descriptor or the attribute it was computing.
#[derive(Debug, Error)]
pub enum FaviconError {
  /// A `<link>` descriptor without a usable `href`.
  #[error("favicon link has neither `href` nor `static-file`: {descriptor}")]
  MissingHref { descriptor: String },

  /// A local reference that none of the static paths contain.
  #[error("`{reference}` is not part of any of the static paths")]
  NotInStaticPath { reference: String },

  /// A local reference that climbs out of the static paths with `..`.
  #[error("`{reference}` points outside of the static paths")]
  OutsideStaticPath { reference: String },

  #[error("failed to read favicon `{path}`: {source}")]
  ReadFile {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  /// Downloading a remote favicon failed, including non-success statuses.
  #[error("failed to fetch favicon `{url}`: {source}")]
  Fetch {
    url:    String,
    #[source]
    source: BoxError,
  },

  /// The asset was found but its dimensions could not be read.
  #[error("failed to read the dimensions of `{reference}`: {source}")]
  Decode {
    reference: String,
    #[source]
    source:    BoxError,
  },
}

impl FaviconError {
  pub(crate) fn fetch(url: &str, source: impl Into<BoxError>) -> Self {
    Self::Fetch {
      url:    url.to_owned(),
      source: source.into(),
    }
  }

  pub(crate) fn decode(reference: &str, source: impl Into<BoxError>) -> Self {
    Self::Decode {
      reference: reference.to_owned(),
      source:    source.into(),
    }
  }
}
