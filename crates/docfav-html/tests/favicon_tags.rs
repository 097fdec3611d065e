#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in tests"
)]

mod common;

use std::{
  fs,
  path::{Path, PathBuf},
};

use common::{StubFetcher, parse_tags, png, svg, write_file};
use docfav_config::{Config, FaviconsConfig};
use docfav_html::Favicons;
use serde_json::json;
use tempfile::TempDir;

fn favicons(value: serde_json::Value) -> Favicons {
  Favicons::new(Config {
    favicons: FaviconsConfig::from(value),
    ..Default::default()
  })
  .with_fetcher(StubFetcher::default())
}

/// A project directory with a `gfx` static path.
fn project(value: serde_json::Value) -> (TempDir, Favicons) {
  let dir = TempDir::new().expect("Failed to create temp dir");
  let favicons = Favicons::new(Config {
    favicons: FaviconsConfig::from(value),
    confdir: dir.path().to_path_buf(),
    static_path: vec![PathBuf::from("gfx")],
    ..Default::default()
  })
  .with_fetcher(StubFetcher::default());
  (dir, favicons)
}

#[test]
fn test_list_of_three_descriptors() {
  let favicons = favicons(json!([
    {
      "rel": "icon",
      "sizes": "16x16",
      "href": "https://secure.example.com/favicon/favicon-16x16.png",
      "type": "image/png",
    },
    {
      "rel": "icon",
      "sizes": "32x32",
      "href": "https://secure.example.com/favicon/favicon-32x32.png",
      "type": "image/png",
    },
    {
      "rel": "apple-touch-icon",
      "sizes": "180x180",
      "href": "https://secure.example.com/favicon/apple-touch-icon-180x180.png",
      "type": "image/png",
    },
  ]));

  let tags = parse_tags(&favicons.render_for_page(Path::new("index.html")));
  assert_eq!(tags.len(), 3);
  assert!(tags.iter().all(|tag| tag.name == "link"));

  assert_eq!(tags[0].get("rel"), Some("icon"));
  assert_eq!(tags[0].get("sizes"), Some("16x16"));
  assert_eq!(tags[1].get("sizes"), Some("32x32"));
  assert_eq!(tags[2].get("rel"), Some("apple-touch-icon"));
  assert_eq!(
    tags[2].get("href"),
    Some("https://secure.example.com/favicon/apple-touch-icon-180x180.png")
  );
  assert_eq!(tags[2].order, ["rel", "href", "sizes", "type"]);
}

#[test]
fn test_rel_and_type_are_inferred() {
  let favicons = favicons(json!([
    {
      "sizes": "16x16",
      "href": "https://secure.example.com/favicon/favicon-16x16.gif",
    },
    {
      "sizes": "32x32",
      "href": "https://secure.example.com/favicon/favicon-32x32.png",
    },
    {
      "rel": "apple-touch-icon",
      "sizes": "180x180",
      "href": "https://secure.example.com/favicon/apple-touch-icon-180x180.png",
    },
  ]));

  let tags = parse_tags(&favicons.render_for_page(Path::new("index.html")));
  assert_eq!(tags.len(), 3);
  assert_eq!(tags[0].get("rel"), Some("icon"));
  assert_eq!(tags[0].get("type"), Some("image/gif"));
  assert_eq!(tags[1].get("rel"), Some("icon"));
  assert_eq!(tags[1].get("type"), Some("image/png"));
  assert_eq!(tags[2].get("rel"), Some("apple-touch-icon"));
  assert_eq!(tags[2].get("type"), Some("image/png"));
}

#[test]
fn test_sizes_are_computed_for_remote_icons() {
  let favicons = favicons(json!([
    "https://secure.example.com/favicon/favicon-16x16.gif",
    "https://secure.example.com/favicon/favicon-32x32.png",
    {
      "rel": "apple-touch-icon",
      "href": "https://secure.example.com/favicon/apple-touch-icon-180x180.png",
    },
  ]));

  let tags = parse_tags(&favicons.render_for_page(Path::new("index.html")));
  let sizes: Vec<_> = tags.iter().map(|tag| tag.get("sizes")).collect();
  // The stub always serves PNG bytes, which is detected from the content
  assert_eq!(sizes, [Some("16x16"), Some("32x32"), Some("180x180")]);
}

#[test]
fn test_single_descriptor() {
  let favicons = favicons(json!({
    "rel": "apple-touch-icon",
    "sizes": "180x180",
    "href": "https://secure.example.com/favicon/apple-touch-icon-180x180.png",
  }));

  assert_eq!(
    favicons.render_for_page(Path::new("index.html")),
    "<link rel=\"apple-touch-icon\" \
     href=\"https://secure.example.com/favicon/apple-touch-icon-180x180.png\" \
     sizes=\"180x180\" type=\"image/png\">"
  );
}

#[test]
fn test_list_of_urls() {
  let favicons = favicons(json!([
    "https://secure.example.com/favicon/favicon-16x16.gif",
    "https://secure.example.com/favicon/favicon-32x32.png",
    "https://secure.example.com/favicon/apple-touch-icon-180x180.png",
  ]));

  let tags = parse_tags(&favicons.render_for_page(Path::new("index.html")));
  let types: Vec<_> = tags.iter().map(|tag| tag.get("type")).collect();
  assert_eq!(
    types,
    [Some("image/gif"), Some("image/png"), Some("image/png")]
  );
  assert!(tags.iter().all(|tag| tag.get("rel") == Some("icon")));
}

#[test]
fn test_static_files_per_page() {
  let (dir, favicons) = project(json!([
    { "static-file": "square.svg" },
    { "href": "nested/triangle.svg" },
    { "rel": "apple-touch-icon", "href": "https://example.com/a-180x180.png" },
  ]));
  write_file(&dir.path().join("gfx"), "square.svg", svg(64, 64));
  write_file(&dir.path().join("gfx"), "nested/triangle.svg", svg(32, 24));

  let root = parse_tags(&favicons.render_for_page(Path::new("index.html")));
  assert_eq!(root[0].get("href"), Some("_static/square.svg"));
  assert_eq!(root[0].get("type"), Some("image/svg+xml"));
  assert_eq!(root[0].get("sizes"), Some("64x64"));
  assert_eq!(root[1].get("href"), Some("_static/nested/triangle.svg"));
  assert_eq!(root[1].get("sizes"), Some("32x24"));
  assert_eq!(root[2].get("href"), Some("https://example.com/a-180x180.png"));

  let nested =
    parse_tags(&favicons.render_for_page(Path::new("nested/page.html")));
  assert_eq!(nested[0].get("href"), Some("../_static/square.svg"));
  assert_eq!(nested[1].get("href"), Some("../_static/nested/triangle.svg"));
  assert_eq!(nested[2].get("href"), Some("https://example.com/a-180x180.png"));
  assert_eq!(nested[0].get("sizes"), Some("64x64"));
}

#[test]
fn test_static_file_wins_over_href() {
  let (dir, favicons) = project(json!({
    "static-file": "square.svg",
    "href": "https://example.com/favicon-32x32.png",
  }));
  write_file(&dir.path().join("gfx"), "square.svg", svg(16, 16));

  let tags = parse_tags(&favicons.render_for_page(Path::new("index.html")));
  assert_eq!(tags.len(), 1);
  assert_eq!(tags[0].get("href"), Some("_static/square.svg"));
  assert_eq!(tags[0].get("static-file"), None);
  assert_eq!(tags[0].get("sizes"), Some("16x16"));
}

#[test]
fn test_msapplication_meta() {
  let (dir, favicons) = project(json!([
    { "name": "msapplication-TileColor", "content": "#2d89ef" },
    { "name": "theme-color", "content": "#ffffff" },
    "mstile-150x150.png",
  ]));
  write_file(&dir.path().join("gfx"), "mstile-150x150.png", png(150, 150));

  let html = favicons.render_for_page(Path::new("index.html"));
  let tags = parse_tags(&html);
  assert_eq!(tags.len(), 3);

  assert_eq!(tags[0].name, "meta");
  assert_eq!(tags[0].order, ["name", "content"]);
  assert_eq!(tags[0].get("content"), Some("#2d89ef"));
  assert_eq!(tags[1].name, "meta");
  assert_eq!(tags[1].get("name"), Some("theme-color"));

  assert_eq!(tags[2].name, "link");
  assert_eq!(tags[2].get("href"), Some("_static/mstile-150x150.png"));
  assert_eq!(tags[2].get("sizes"), Some("150x150"));
}

#[test]
fn test_unresolvable_local_file_renders_without_sizes() {
  let (_dir, favicons) = project(json!("missing.png"));

  let tags = parse_tags(&favicons.render_for_page(Path::new("index.html")));
  assert_eq!(tags.len(), 1);
  assert_eq!(tags[0].get("href"), Some("_static/missing.png"));
  assert_eq!(tags[0].get("type"), Some("image/png"));
  assert_eq!(tags[0].get("sizes"), None);
}

#[test]
fn test_compute_sizes_disabled() {
  let dir = TempDir::new().unwrap();
  write_file(&dir.path().join("gfx"), "icon.png", png(48, 48));

  let favicons = Favicons::new(Config {
    favicons: FaviconsConfig::from(json!(["icon.png"])),
    confdir: dir.path().to_path_buf(),
    static_path: vec![PathBuf::from("gfx")],
    compute_sizes: false,
    ..Default::default()
  });

  assert_eq!(
    favicons.render_for_page(Path::new("index.html")),
    r#"<link rel="icon" href="_static/icon.png" type="image/png">"#
  );
}

#[test]
fn test_config_file_end_to_end() {
  let dir = TempDir::new().unwrap();
  write_file(&dir.path().join("gfx"), "logo.png", png(24, 24));
  let config_path = dir.path().join("docfav.toml");
  fs::write(
    &config_path,
    r##"
static_path = ["gfx"]
static_output_dir = "assets"

[[favicons]]
href = "logo.png"

[[favicons]]
name = "theme-color"
content = "#ffffff"
"##,
  )
  .unwrap();

  let mut config = Config::from_file(&config_path).unwrap();
  config.confdir = dir.path().to_path_buf();
  let favicons = Favicons::new(config).with_fetcher(StubFetcher::default());

  let mut metatags = String::from("<meta charset=\"utf-8\">\n");
  favicons.extend_metatags(&mut metatags, Path::new("guide/intro.html"));

  assert_eq!(
    metatags,
    "<meta charset=\"utf-8\">\n<link rel=\"icon\" \
     href=\"../assets/logo.png\" sizes=\"24x24\" type=\"image/png\">\n<meta \
     name=\"theme-color\" content=\"#ffffff\">"
  );
}
