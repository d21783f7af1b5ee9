//! Persisting the archive at its stable cache path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PrebuildError;

/// Copy `found` to `dest`.
///
/// The bytes go to a hidden sibling first and are renamed into place, so
/// `dest` either holds a complete archive or does not exist.
pub fn cache_archive(found: &Path, dest: &Path) -> Result<(), PrebuildError> {
  let copy_failed = |source: std::io::Error| PrebuildError::CopyFailed {
    from: found.to_path_buf(),
    to: dest.to_path_buf(),
    source,
  };

  if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(copy_failed)?;
  }

  let partial = partial_path(dest);
  if let Err(e) = fs::copy(found, &partial).and_then(|_| fs::rename(&partial, dest)) {
    let _ = fs::remove_file(&partial);
    return Err(copy_failed(e));
  }

  info!(from = %found.display(), to = %dest.display(), "cached archive");
  Ok(())
}

fn partial_path(dest: &Path) -> PathBuf {
  let name = dest
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  dest.with_file_name(format!(".{}.partial", name))
}
