pub mod config;
pub mod descriptor;
pub mod error;

pub use config::Config;
pub use descriptor::{
  FaviconDescriptor,
  FaviconEntry,
  FaviconsConfig,
  STATIC_FILE_KEY,
};
pub use error::ConfigError;
