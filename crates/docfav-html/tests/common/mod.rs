#![allow(dead_code, reason = "Not every test file uses every helper")]

use std::{
  collections::HashMap,
  fs,
  io::Cursor,
  path::Path,
  sync::Mutex,
};

use docfav_html::{AssetFetcher, FaviconError};
use image::{DynamicImage, ImageFormat};

/// Encode a blank PNG of the given dimensions.
pub fn png(width: u32, height: u32) -> Vec<u8> {
  let mut bytes = Vec::new();
  DynamicImage::new_rgba8(width, height)
    .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
    .expect("Failed to encode PNG");
  bytes
}

/// A minimal SVG document with an explicit viewport.
pub fn svg(width: u32, height: u32) -> String {
  format!(
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" \
     height=\"{height}\"><rect width=\"{width}\" height=\"{height}\"/></svg>"
  )
}

/// Write `bytes` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, bytes: impl AsRef<[u8]>) {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).expect("Failed to create directory");
  }
  fs::write(&path, bytes).expect("Failed to write file");
}

/// Stands in for the network: serves a PNG whose dimensions are taken from
/// the first `WxH` token in the URL (e.g. `favicon-16x16.png`), 16x16 if
/// there is none.
#[derive(Default)]
pub struct StubFetcher {
  pub calls: Mutex<Vec<String>>,
}

impl AssetFetcher for StubFetcher {
  fn fetch(&self, url: &str) -> Result<Vec<u8>, FaviconError> {
    self
      .calls
      .lock()
      .expect("Poisoned lock")
      .push(url.to_owned());
    let (width, height) = size_hint(url).unwrap_or((16, 16));
    Ok(png(width, height))
  }
}

fn size_hint(url: &str) -> Option<(u32, u32)> {
  url
    .split(|c: char| !c.is_ascii_alphanumeric())
    .find_map(|token| {
      let (w, h) = token.split_once('x')?;
      Some((w.parse().ok()?, h.parse().ok()?))
    })
}

/// A rendered tag, parsed back into its name and attributes.
#[derive(Debug)]
pub struct Tag {
  pub name:  String,
  pub attrs: HashMap<String, String>,
  pub order: Vec<String>,
}

impl Tag {
  pub fn get(&self, key: &str) -> Option<&str> {
    self.attrs.get(key).map(String::as_str)
  }
}

/// Parse the newline separated output of the generator.
///
/// Only understands what the generator writes: one tag per line, every
/// attribute double-quoted.
pub fn parse_tags(html: &str) -> Vec<Tag> {
  html
    .lines()
    .filter(|line| !line.trim().is_empty())
    .map(|line| {
      let inner = line
        .trim()
        .strip_prefix('<')
        .and_then(|l| l.strip_suffix('>'))
        .expect("Tag should be wrapped in angle brackets");
      let (name, mut rest) = inner.split_once(' ').unwrap_or((inner, ""));

      let mut attrs = HashMap::new();
      let mut order = Vec::new();
      while let Some((key, after)) = rest.split_once("=\"") {
        let (value, tail) =
          after.split_once('"').expect("Unterminated attribute value");
        let key = key.trim().to_owned();
        order.push(key.clone());
        attrs.insert(key, value.to_owned());
        rest = tail;
      }

      Tag {
        name: name.to_owned(),
        attrs,
        order,
      }
    })
    .collect()
}
