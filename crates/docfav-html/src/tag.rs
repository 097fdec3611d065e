use std::fmt::Write;

use docfav_config::{FaviconDescriptor, STATIC_FILE_KEY};
use html_escape::encode_double_quoted_attribute;

use crate::{error::FaviconError, mime};

/// Attributes written first, in this order, for `<link>` tags.
const LINK_ATTRIBUTES: [&str; 4] = ["rel", "href", "sizes", "type"];

/// Attributes written first, in this order, for `<meta>` tags.
const META_ATTRIBUTES: [&str; 2] = ["name", "content"];

/// Render a single favicon descriptor as an HTML tag.
///
/// Descriptors with a `name` become `<meta>` tags and are written as given.
/// Everything else becomes a `<link>` tag, where:
///
/// - `rel` defaults to `icon`
/// - `type` is derived from the file extension of `href` when missing or
///   empty, and omitted when the extension is unknown
/// - `sizes` is only written when present
///
/// Well-known attributes come first in a fixed order, any others follow in
/// the order they were configured. Values are escaped for use in a
/// double-quoted attribute; names that are not valid HTML attribute names
/// are dropped with a warning.
///
/// # Errors
///
/// Returns [`FaviconError::MissingHref`] for a `<link>` descriptor without an
/// `href`.
pub fn render_tag(
  descriptor: &FaviconDescriptor,
) -> Result<String, FaviconError> {
  if descriptor.is_meta() {
    return Ok(write_tag("meta", &META_ATTRIBUTES, descriptor));
  }

  let Some(href) = descriptor.href().filter(|href| !href.is_empty()) else {
    return Err(FaviconError::MissingHref {
      descriptor: format!("{descriptor:?}"),
    });
  };

  let mut link = descriptor.clone();
  if !link.contains("rel") {
    link.insert("rel", "icon");
  }
  if link.get("type").is_some_and(str::is_empty) {
    link.remove("type");
  }
  if !link.contains("type")
    && let Some(mime_type) = mime::mime_type(href)
  {
    link.insert("type", mime_type);
  }

  Ok(write_tag("link", &LINK_ATTRIBUTES, &link))
}

fn write_tag(
  tag: &str,
  leading: &[&str],
  descriptor: &FaviconDescriptor,
) -> String {
  let leading_attrs = leading
    .iter()
    .filter_map(|key| descriptor.get(key).map(|value| (*key, value)));
  let other_attrs = descriptor
    .iter()
    .filter(|(key, _)| !leading.contains(key) && *key != STATIC_FILE_KEY)
    .filter(|(key, _)| {
      let valid = is_attribute_name(key);
      if !valid {
        log::warn!(
          "docfav: dropping favicon attribute `{key}`, not a valid HTML \
           attribute name"
        );
      }
      valid
    });

  let mut html = format!("<{tag}");
  for (key, value) in leading_attrs.chain(other_attrs) {
    // Writing to String is infallible
    let _ =
      write!(html, " {key}=\"{}\"", encode_double_quoted_attribute(value));
  }
  html.push('>');
  html
}

/// HTML attribute names may not contain whitespace, quotes, `>`, `/`, `=`
/// or control characters.
fn is_attribute_name(key: &str) -> bool {
  !key.is_empty()
    && !key.chars().any(|c| {
      c.is_whitespace()
        || c.is_control()
        || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
    })
}
