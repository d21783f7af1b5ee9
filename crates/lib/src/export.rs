//! Environment export lines.
//!
//! Output is text for the calling shell to `eval`; this process's own
//! environment is never modified.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::consts::{LIB_DIR_VAR, STATIC_VAR};
use crate::error::PrebuildError;
use crate::platform::Shell;

/// Value exported for the static-linking switch.
pub const STATIC_VALUE: &str = "1";

/// Absolute, symlink-free directory for `archive_dir_or_path`.
///
/// A file path resolves to its containing directory.
pub fn resolve_lib_dir(archive_dir_or_path: &Path) -> Result<PathBuf, PrebuildError> {
  let resolved = dunce::canonicalize(archive_dir_or_path).map_err(|source| PrebuildError::ResolvePath {
    path: archive_dir_or_path.to_path_buf(),
    source,
  })?;

  if resolved.is_dir() {
    return Ok(resolved);
  }
  match resolved.parent() {
    Some(parent) => Ok(parent.to_path_buf()),
    None => Err(PrebuildError::ResolvePath {
      path: archive_dir_or_path.to_path_buf(),
      source: std::io::Error::other("archive path has no parent directory"),
    }),
  }
}

/// The two exported variables, in output order.
pub fn export_vars(lib_dir: &Path) -> [(&'static str, String); 2] {
  [
    (LIB_DIR_VAR, lib_dir.display().to_string()),
    (STATIC_VAR, STATIC_VALUE.to_string()),
  ]
}

/// Render the export lines, each newline-terminated.
pub fn render_exports(lib_dir: &Path, shell: Shell) -> String {
  export_vars(lib_dir)
    .iter()
    .map(|(name, value)| format!("{}\n", shell.export_var(name, value)))
    .collect()
}

/// Write the export lines for the archive at (or directory) `archive_dir_or_path`.
pub fn emit_environment<W: Write>(out: &mut W, archive_dir_or_path: &Path, shell: Shell) -> Result<(), PrebuildError> {
  let lib_dir = resolve_lib_dir(archive_dir_or_path)?;
  let text = render_exports(&lib_dir, shell);
  out
    .write_all(text.as_bytes())
    .and_then(|_| out.flush())
    .map_err(PrebuildError::Emit)
}
