use std::path::Path;

use docfav_config::{Config, FaviconEntry, FaviconsConfig};

use crate::{
  resolve::{PageRelative, PathResolver, resolve_descriptor},
  sizes::{AssetFetcher, HttpFetcher, SizeInference},
  tag::render_tag,
};

/// Create the `<link>` and `<meta>` tags for all configured favicons.
///
/// Each entry is resolved against the current page, enriched with a computed
/// `sizes` when size inference is enabled, and rendered. Tags are joined with
/// newlines in configuration order.
///
/// Nothing in here fails the page: invalid entries are skipped and an
/// unsupported configuration renders nothing, each with a warning.
#[must_use]
pub fn create_favicons_meta(
  favicons: &FaviconsConfig,
  static_output_dir: &str,
  resolver: &dyn PathResolver,
  sizes: Option<&SizeInference<'_>>,
) -> String {
  let entries = match favicons.entries() {
    Ok(entries) => entries,
    Err(value) => {
      log::warn!(
        "docfav: invalid favicons config value: {value}. Custom favicons will \
         not be included in build."
      );
      return String::new();
    },
  };

  let mut tags = Vec::with_capacity(entries.len());
  for entry in entries {
    let Some(descriptor) = entry.clone().into_descriptor() else {
      if let FaviconEntry::Invalid(value) = entry {
        log::warn!(
          "docfav: invalid favicon entry: {value}. This favicon will not be \
           included in build."
        );
      }
      continue;
    };

    let mut favicon =
      resolve_descriptor(descriptor, static_output_dir, resolver);
    if let Some(sizes) = sizes {
      sizes.apply(&mut favicon);
    }

    match render_tag(favicon.descriptor()) {
      Ok(tag) => tags.push(tag),
      Err(e) => log::warn!("docfav: skipping favicon: {e}"),
    }
  }

  tags.join("\n")
}

/// Favicon tag generator for a documentation build.
///
/// Build one per project and call it for every rendered page. It holds no
/// per-page state, so pages may be rendered from several threads.
pub struct Favicons {
  config:  Config,
  fetcher: Option<Box<dyn AssetFetcher>>,
}

impl Favicons {
  /// Remote favicons are downloaded over HTTP when both `compute_sizes` and
  /// `fetch_remote` are enabled.
  #[must_use]
  pub fn new(config: Config) -> Self {
    let fetcher: Option<Box<dyn AssetFetcher>> =
      if config.compute_sizes && config.fetch_remote {
        Some(Box::new(HttpFetcher::new(config.fetch_timeout())))
      } else {
        None
      };

    Self { config, fetcher }
  }

  /// Replace the HTTP client used to download remote favicons.
  #[must_use]
  pub fn with_fetcher(
    mut self,
    fetcher: impl AssetFetcher + 'static,
  ) -> Self {
    self.fetcher = Some(Box::new(fetcher));
    self
  }

  #[must_use]
  pub const fn config(&self) -> &Config {
    &self.config
  }

  /// Render all favicon tags, resolving local files through `resolver`.
  #[must_use]
  pub fn render(&self, resolver: &dyn PathResolver) -> String {
    let sizes = self.config.compute_sizes.then(|| {
      SizeInference::new(
        self.config.static_search_dirs().collect(),
        self.fetcher.as_deref(),
      )
    });

    create_favicons_meta(
      &self.config.favicons,
      &self.config.static_output_dir,
      resolver,
      sizes.as_ref(),
    )
  }

  /// Render all favicon tags for the page at `page`, a path relative to the
  /// output directory such as `nested/page.html`.
  #[must_use]
  pub fn render_for_page(&self, page: &Path) -> String {
    self.render(&PageRelative::new(page))
  }

  /// Append the favicon tags for `page` to the page's existing head metadata.
  ///
  /// Leaves `metatags` untouched when no favicons are configured.
  pub fn extend_metatags(&self, metatags: &mut String, page: &Path) {
    if self.config.favicons.is_empty() {
      return;
    }

    let tags = self.render_for_page(page);
    if tags.is_empty() {
      return;
    }

    if !metatags.is_empty() && !metatags.ends_with('\n') {
      metatags.push('\n');
    }
    metatags.push_str(&tags);
  }
}
