use std::path::PathBuf;

use crate::consts::{APP_NAME, SOURCE_DIR_NAME};

/// Returns the user's home directory
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").filter(|h| !h.is_empty()).map(PathBuf::from)
}

/// Returns the directory for cache files for the application
pub fn cache_dir() -> Option<PathBuf> {
  let cache_home = std::env::var_os("XDG_CACHE_HOME")
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
    .or_else(|| home_dir().map(|home| home.join(".cache")))?;
  Some(cache_home.join(APP_NAME))
}

/// Default location of the storage-engine checkout.
pub fn default_source_dir() -> Option<PathBuf> {
  cache_dir().map(|dir| dir.join(SOURCE_DIR_NAME))
}
