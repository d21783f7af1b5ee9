//! Error types for rocksenv-lib.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::process::CommandError;

/// A fatal failure of one pipeline step.
///
/// None of these are retried. Each maps to a distinct process exit code
/// through [`PrebuildError::exit_code`].
#[derive(Debug, Error)]
pub enum PrebuildError {
  /// The checkout directory is missing and cloning it failed.
  #[error("failed to clone '{url}' into '{}': {source}", .path.display())]
  SourceUnavailable {
    url: String,
    path: PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  /// The external build tool could not be run or exited non-zero.
  #[error("build failed: {0}")]
  BuildFailed(#[source] CommandError),

  /// No file with the archive name exists under the build output tree.
  #[error("no '{name}' found under '{}'", .root.display())]
  ArtifactNotFound { root: PathBuf, name: String },

  /// More than one candidate archive and the policy refuses to guess.
  #[error("found {} candidates for '{name}': {}", .candidates.len(), join_paths(.candidates))]
  AmbiguousArtifact { name: String, candidates: Vec<PathBuf> },

  /// Copying the archive to its cache location failed.
  #[error("failed to copy '{}' to '{}': {source}", .from.display(), .to.display())]
  CopyFailed {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A path could not be made absolute or resolved through symlinks.
  #[error("failed to resolve path '{}': {source}", .path.display())]
  ResolvePath {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The export lines could not be written.
  #[error("failed to write environment: {0}")]
  Emit(#[source] std::io::Error),

  /// Invalid configuration value.
  #[error("invalid configuration: {0}")]
  Config(String),
}

impl PrebuildError {
  /// Process exit code reported by the CLI for this failure.
  pub fn exit_code(&self) -> u8 {
    match self {
      PrebuildError::SourceUnavailable { .. } => 3,
      PrebuildError::BuildFailed(_) => 4,
      PrebuildError::ArtifactNotFound { .. } => 5,
      PrebuildError::AmbiguousArtifact { .. } => 6,
      PrebuildError::CopyFailed { .. } => 7,
      PrebuildError::ResolvePath { .. } => 8,
      PrebuildError::Config(_) => 9,
      PrebuildError::Emit(_) => 10,
    }
  }
}

fn join_paths(paths: &[PathBuf]) -> String {
  paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
