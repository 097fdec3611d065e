//! Turning favicon references into hrefs usable from a rendered page.
use std::path::Path;

use docfav_config::{FaviconDescriptor, STATIC_FILE_KEY};
use url::Url;

/// Maps a path inside the build output to an href relative to the page
/// currently being rendered.
///
/// This is the host's job; closures of type `Fn(&str) -> String` can be used
/// directly.
pub trait PathResolver {
  fn resolve(&self, output_path: &str) -> String;
}

impl<F> PathResolver for F
where
  F: Fn(&str) -> String,
{
  fn resolve(&self, output_path: &str) -> String {
    self(output_path)
  }
}

/// Resolves output paths relative to a page, based on how deep the page is
/// nested in the output directory.
#[derive(Debug, Clone)]
pub struct PageRelative {
  root_prefix: String,
}

impl PageRelative {
  /// `page` is the output path of the page, e.g. `nested/page.html`.
  #[must_use]
  pub fn new(page: &Path) -> Self {
    Self {
      root_prefix: calculate_root_relative_path(page),
    }
  }
}

impl PathResolver for PageRelative {
  fn resolve(&self, output_path: &str) -> String {
    format!("{}{output_path}", self.root_prefix)
  }
}

/// Calculate the relative path prefix needed to reach the output root from a
/// page. For example: "index.html" returns "", "nested/page.html" returns
/// "../" and "a/b/page.html" returns "../../".
#[must_use]
pub fn calculate_root_relative_path(page: &Path) -> String {
  let depth = page.components().count();
  if depth <= 1 {
    String::new()
  } else {
    "../".repeat(depth - 1)
  }
}

/// Where the bytes of a favicon can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
  /// A downloadable URL.
  Remote(String),
  /// A path to look up in the static asset directories.
  Local(String),
}

impl AssetSource {
  #[must_use]
  pub fn reference(&self) -> &str {
    match self {
      Self::Remote(url) => url,
      Self::Local(path) => path,
    }
  }
}

/// A descriptor whose `href` has been rewritten for the page being rendered.
///
/// Resolution consumes the original descriptor, so a reference can only ever
/// be rewritten once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFavicon {
  descriptor: FaviconDescriptor,
  source:     Option<AssetSource>,
}

impl ResolvedFavicon {
  #[must_use]
  pub const fn descriptor(&self) -> &FaviconDescriptor {
    &self.descriptor
  }

  pub const fn descriptor_mut(&mut self) -> &mut FaviconDescriptor {
    &mut self.descriptor
  }

  /// The asset referenced before resolution, `None` for descriptors without
  /// an href (such as `<meta>` tags).
  #[must_use]
  pub const fn source(&self) -> Option<&AssetSource> {
    self.source.as_ref()
  }

  #[must_use]
  pub fn into_descriptor(self) -> FaviconDescriptor {
    self.descriptor
  }
}

/// Whether a reference is used verbatim as an href.
#[must_use]
pub fn is_absolute(reference: &str) -> bool {
  reference.starts_with("http://")
    || reference.starts_with("https://")
    || reference.starts_with('/')
}

/// The downloadable URL behind a reference, if it points to another host.
///
/// Protocol-relative references (`//cdn.example.com/icon.png`) are fetched
/// over https.
#[must_use]
pub fn remote_url(reference: &str) -> Option<Url> {
  let candidate = if reference.starts_with("//") {
    format!("https:{reference}")
  } else if reference.starts_with("http://")
    || reference.starts_with("https://")
  {
    reference.to_owned()
  } else {
    return None;
  };

  Url::parse(&candidate)
    .ok()
    .filter(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// Rewrite the `href` of a descriptor so it can be used from the current page.
///
/// - The legacy `static-file` key takes precedence over `href`: its value
///   replaces any `href` and the key itself is dropped.
/// - Absolute references (`http://`, `https://`, `/`) are kept as they are.
/// - Anything else is a file in the static asset directory, resolved through
///   `resolver` as `<static_output_dir>/<reference>`.
#[must_use]
pub fn resolve_descriptor(
  mut descriptor: FaviconDescriptor,
  static_output_dir: &str,
  resolver: &dyn PathResolver,
) -> ResolvedFavicon {
  if let Some(static_file) = descriptor.remove(STATIC_FILE_KEY) {
    if let Some(href) = descriptor.href() {
      log::debug!(
        "docfav: `{STATIC_FILE_KEY}` = `{static_file}` overrides `href` = \
         `{href}`"
      );
    }
    descriptor.insert("href", static_file);
  }

  let Some(reference) = descriptor.href().filter(|href| !href.is_empty())
  else {
    return ResolvedFavicon {
      descriptor,
      source: None,
    };
  };

  if is_absolute(reference) {
    let source = remote_url(reference).map_or_else(
      || AssetSource::Local(reference.trim_start_matches('/').to_owned()),
      |url| AssetSource::Remote(url.into()),
    );
    return ResolvedFavicon {
      descriptor,
      source: Some(source),
    };
  }

  let local = reference.trim_start_matches("./").to_owned();
  let static_dir = static_output_dir.trim_end_matches('/');
  let href = resolver.resolve(&format!("{static_dir}/{local}"));
  descriptor.insert("href", href);

  ResolvedFavicon {
    descriptor,
    source: Some(AssetSource::Local(local)),
  }
}
