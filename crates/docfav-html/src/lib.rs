//! `docfav-html`.
//!
//! Generates favicon `<link>` and `<meta>` tags for the `<head>` of pages in
//! a documentation build. Favicons are described in configuration as maps,
//! bare strings, or a list of both; local files are resolved to hrefs
//! relative to each page, and missing `type` and `sizes` attributes are
//! inferred from the referenced images.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use docfav_config::Config;
//! use docfav_html::Favicons;
//!
//! let config = Config::from_file("docfav.toml").unwrap();
//! let favicons = Favicons::new(config);
//!
//! let mut metatags = String::new();
//! favicons.extend_metatags(&mut metatags, Path::new("nested/page.html"));
//! ```

pub mod error;
pub mod mime;
pub mod pipeline;
pub mod resolve;
pub mod sizes;
pub mod tag;

pub use error::FaviconError;
pub use pipeline::{Favicons, create_favicons_meta};
pub use resolve::{
  AssetSource,
  PageRelative,
  PathResolver,
  ResolvedFavicon,
  resolve_descriptor,
};
pub use sizes::{AssetFetcher, HttpFetcher, SizeInference};
pub use tag::render_tag;
