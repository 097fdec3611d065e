//! File extension lookups for favicon assets.

/// MIME types advertised in the `type` attribute, keyed by file extension.
const MIME_TYPES: [(&str, &str); 7] = [
  ("bmp", "image/x-ms-bmp"),
  ("gif", "image/gif"),
  ("ico", "image/x-icon"),
  ("jpeg", "image/jpeg"),
  ("jpg", "image/jpeg"),
  ("png", "image/png"),
  ("svg", "image/svg+xml"),
];

/// Extensions whose pixel dimensions can be read to fill in `sizes`.
const MEASURABLE: [&str; 7] =
  ["bmp", "gif", "ico", "jpeg", "jpg", "png", "svg"];

/// Lowercased file extension of a reference, ignoring any query string or
/// fragment.
///
/// Works for plain paths as well as full URLs:
/// `https://example.com/icons/Favicon.PNG?v=2` yields `png`.
#[must_use]
pub fn extension(reference: &str) -> Option<String> {
  let path = reference.split(['?', '#']).next().unwrap_or(reference);
  let file_name = path.rsplit('/').next().unwrap_or(path);
  let (stem, ext) = file_name.rsplit_once('.')?;

  if stem.is_empty() || ext.is_empty() {
    return None;
  }

  Some(ext.to_ascii_lowercase())
}

/// MIME type for a reference, if its extension is a known image format.
#[must_use]
pub fn mime_type(reference: &str) -> Option<&'static str> {
  let ext = extension(reference)?;
  MIME_TYPES
    .iter()
    .find(|(known, _)| *known == ext)
    .map(|(_, mime)| *mime)
}

/// Whether the extension names a format whose dimensions can be measured.
#[must_use]
pub fn is_measurable(extension: &str) -> bool {
  MEASURABLE.contains(&extension)
}
