//! Locating the static archive in the build output tree.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::PrebuildError;

/// How to choose between several files carrying the archive name.
///
/// Traversal order is filesystem dependent, so "first found" is never used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
  /// Fail with [`PrebuildError::AmbiguousArtifact`].
  #[default]
  Error,
  /// Take the most recently modified file; equal times go to the
  /// lexicographically smallest path.
  Newest,
}

/// Find the single file named `archive_name` below `root`.
pub fn locate_archive(root: &Path, archive_name: &str, policy: AmbiguityPolicy) -> Result<PathBuf, PrebuildError> {
  let not_found = || PrebuildError::ArtifactNotFound {
    root: root.to_path_buf(),
    name: archive_name.to_string(),
  };

  if !root.is_dir() {
    return Err(not_found());
  }

  let mut candidates = Vec::new();
  for entry in WalkDir::new(root) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        warn!(error = %e, "skipping unreadable entry");
        continue;
      }
    };
    if entry.file_type().is_file() && entry.file_name() == archive_name {
      debug!(path = %entry.path().display(), "archive candidate");
      candidates.push(entry.into_path());
    }
  }
  candidates.sort();

  match candidates.len() {
    0 => Err(not_found()),
    1 => Ok(candidates.remove(0)),
    _ => match policy {
      AmbiguityPolicy::Error => Err(PrebuildError::AmbiguousArtifact {
        name: archive_name.to_string(),
        candidates,
      }),
      AmbiguityPolicy::Newest => Ok(newest(candidates)),
    },
  }
}

/// `candidates` is sorted and non-empty.
fn newest(candidates: Vec<PathBuf>) -> PathBuf {
  let mut best: Option<(SystemTime, PathBuf)> = None;
  for path in candidates {
    let modified = std::fs::metadata(&path)
      .and_then(|m| m.modified())
      .unwrap_or(SystemTime::UNIX_EPOCH);
    // Strictly newer only, so the earlier (smaller) path wins ties.
    if best.as_ref().is_none_or(|(time, _)| modified > *time) {
      best = Some((modified, path));
    }
  }
  best.map(|(_, path)| path).unwrap_or_default()
}
