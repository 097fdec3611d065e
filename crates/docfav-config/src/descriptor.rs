//! Favicon descriptors as they appear in user configuration.
//!
//! Configuration may describe favicons in several shapes: a single map, a
//! single string, or a list mixing both. Everything is funnelled through
//! [`serde_json::Value`] so that malformed entries survive loading and can be
//! reported (and skipped) at render time instead of failing the whole build.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Legacy descriptor key naming a file inside the static asset path.
pub const STATIC_FILE_KEY: &str = "static-file";

/// An ordered set of attributes describing one favicon `<link>` or `<meta>`
/// tag.
///
/// Key order is the order in which the attributes were configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaviconDescriptor {
  attrs: IndexMap<String, String>,
}

impl FaviconDescriptor {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Shorthand for a descriptor with only an `href`.
  #[must_use]
  pub fn from_href(href: impl Into<String>) -> Self {
    Self::new().with("href", href)
  }

  /// Builder-style [`Self::insert`].
  #[must_use]
  pub fn with(
    mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.insert(key, value);
    self
  }

  /// Build a descriptor from a JSON object.
  ///
  /// `null` values are dropped, numbers and booleans are stringified. Nested
  /// arrays and objects cannot be rendered as attributes and are dropped with
  /// a warning.
  #[must_use]
  pub fn from_json_map(map: &Map<String, Value>) -> Self {
    let mut descriptor = Self::new();
    for (key, value) in map {
      match value {
        Value::Null => {},
        Value::String(s) => {
          descriptor.insert(key.as_str(), s.as_str());
        },
        Value::Bool(b) => {
          descriptor.insert(key.as_str(), b.to_string());
        },
        Value::Number(n) => {
          descriptor.insert(key.as_str(), n.to_string());
        },
        Value::Array(_) | Value::Object(_) => {
          log::warn!(
            "docfav: ignoring favicon attribute `{key}`, expected a string but \
             got {value}"
          );
        },
      }
    }
    descriptor
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&str> {
    self.attrs.get(key).map(String::as_str)
  }

  #[must_use]
  pub fn contains(&self, key: &str) -> bool {
    self.attrs.contains_key(key)
  }

  /// Set an attribute, returning the previous value.
  ///
  /// Replacing an existing key keeps its original position.
  pub fn insert(
    &mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Option<String> {
    self.attrs.insert(key.into(), value.into())
  }

  /// Remove an attribute while keeping the order of the remaining ones.
  pub fn remove(&mut self, key: &str) -> Option<String> {
    self.attrs.shift_remove(key)
  }

  /// A descriptor carrying `name` renders as a `<meta>` tag.
  #[must_use]
  pub fn is_meta(&self) -> bool {
    self.contains("name")
  }

  #[must_use]
  pub fn href(&self) -> Option<&str> {
    self.get("href")
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.attrs.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.attrs.is_empty()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)>
  for FaviconDescriptor
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      attrs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }
}

/// One element of a favicon configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FaviconEntry {
  /// Bare string, shorthand for `{ href = "..." }`.
  Href(String),
  Descriptor(FaviconDescriptor),
  /// Anything else. Kept so it can be reported when rendering.
  Invalid(Value),
}

impl FaviconEntry {
  /// Normalize into a descriptor, or `None` for invalid entries.
  #[must_use]
  pub fn into_descriptor(self) -> Option<FaviconDescriptor> {
    match self {
      Self::Href(href) => Some(FaviconDescriptor::from_href(href)),
      Self::Descriptor(descriptor) => Some(descriptor),
      Self::Invalid(_) => None,
    }
  }
}

impl From<Value> for FaviconEntry {
  fn from(value: Value) -> Self {
    match value {
      Value::String(href) => Self::Href(href),
      Value::Object(ref map) => {
        Self::Descriptor(FaviconDescriptor::from_json_map(map))
      },
      other => Self::Invalid(other),
    }
  }
}

impl From<&str> for FaviconEntry {
  fn from(href: &str) -> Self {
    Self::Href(href.to_owned())
  }
}

impl From<FaviconDescriptor> for FaviconEntry {
  fn from(descriptor: FaviconDescriptor) -> Self {
    Self::Descriptor(descriptor)
  }
}

impl From<FaviconEntry> for Value {
  fn from(entry: FaviconEntry) -> Self {
    match entry {
      FaviconEntry::Href(href) => Self::String(href),
      FaviconEntry::Descriptor(descriptor) => {
        Self::Object(
          descriptor
            .iter()
            .map(|(k, v)| (k.to_owned(), Self::String(v.to_owned())))
            .collect(),
        )
      },
      FaviconEntry::Invalid(value) => value,
    }
  }
}

/// The complete favicon configuration of a project.
///
/// Accepts a single descriptor or string as well as a list of them. Order of
/// the list is the order of the generated tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FaviconsConfig {
  /// Nothing configured.
  #[default]
  None,
  Single(FaviconEntry),
  List(Vec<FaviconEntry>),
  /// A top-level value that is neither a map, a string, nor a list.
  Unsupported(Value),
}

impl FaviconsConfig {
  /// The configured entries in order.
  ///
  /// # Errors
  ///
  /// Returns the offending value when the configuration has an unsupported
  /// shape.
  pub fn entries(&self) -> Result<&[FaviconEntry], &Value> {
    match self {
      Self::None => Ok(&[]),
      Self::Single(entry) => Ok(std::slice::from_ref(entry)),
      Self::List(entries) => Ok(entries),
      Self::Unsupported(value) => Err(value),
    }
  }

  /// Whether there is nothing to render.
  ///
  /// An unsupported configuration is not empty: it still deserves a warning.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    match self {
      Self::None => true,
      Self::List(entries) => entries.is_empty(),
      Self::Single(_) | Self::Unsupported(_) => false,
    }
  }
}

impl From<Value> for FaviconsConfig {
  fn from(value: Value) -> Self {
    match value {
      Value::Null => Self::None,
      Value::Array(items) => {
        Self::List(items.into_iter().map(FaviconEntry::from).collect())
      },
      Value::String(_) | Value::Object(_) => {
        Self::Single(FaviconEntry::from(value))
      },
      other @ (Value::Bool(_) | Value::Number(_)) => Self::Unsupported(other),
    }
  }
}

impl From<FaviconsConfig> for Value {
  fn from(config: FaviconsConfig) -> Self {
    match config {
      FaviconsConfig::None => Self::Null,
      FaviconsConfig::Single(entry) => entry.into(),
      FaviconsConfig::List(entries) => {
        Self::Array(entries.into_iter().map(Self::from).collect())
      },
      FaviconsConfig::Unsupported(value) => value,
    }
  }
}

impl From<Vec<FaviconEntry>> for FaviconsConfig {
  fn from(entries: Vec<FaviconEntry>) -> Self {
    Self::List(entries)
  }
}

impl From<FaviconDescriptor> for FaviconsConfig {
  fn from(descriptor: FaviconDescriptor) -> Self {
    Self::Single(FaviconEntry::Descriptor(descriptor))
  }
}
