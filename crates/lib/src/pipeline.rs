//! The end-to-end sequence: source, build, locate, cache, resolve.
//!
//! Any failing step aborts the run before an export directory is produced.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::build::{BuildOutcome, BuildSpec, BuildTool, CachePolicy, build};
use crate::cache::cache_archive;
use crate::config::PrebuildConfig;
use crate::consts::TARGET_DIR_NAME;
use crate::error::PrebuildError;
use crate::export::resolve_lib_dir;
use crate::locate::locate_archive;
use crate::source::{Cloner, ensure_source};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildResult {
  pub source_dir: PathBuf,
  /// The archive whose directory is exported.
  pub archive_path: PathBuf,
  /// Stable copy of the archive; only with [`CachePolicy::ReuseCached`].
  pub cached_archive_path: Option<PathBuf>,
  /// Canonical directory containing `archive_path`.
  pub lib_dir: PathBuf,
  /// Whether the build tool ran.
  pub rebuilt: bool,
}

/// Where the cache-aware policy keeps its copy of the archive.
pub fn cached_archive_path(source_dir: &Path, archive_name: &str) -> PathBuf {
  source_dir.join(archive_name)
}

pub async fn run<C: Cloner, T: BuildTool>(
  config: &PrebuildConfig,
  cloner: &C,
  tool: &T,
) -> Result<BuildResult, PrebuildError> {
  let start = Instant::now();
  // The nested build runs with the checkout as its working directory, so
  // every path handed to it must be absolute.
  let source_dir = std::path::absolute(&config.source_dir).map_err(|source| PrebuildError::ResolvePath {
    path: config.source_dir.clone(),
    source,
  })?;
  let target_dir = source_dir.join(TARGET_DIR_NAME);
  let cache_path = cached_archive_path(&source_dir, &config.archive_name);

  ensure_source(&config.repo_url, &source_dir, cloner).await?;

  let spec = BuildSpec::new(config.features.clone(), &target_dir);
  let outcome = build(tool, &source_dir, &spec, config.cache_policy, &cache_path).await?;

  let (archive_path, cached_archive_path, rebuilt) = match outcome {
    BuildOutcome::Cached(path) => (path.clone(), Some(path), false),
    BuildOutcome::Built => {
      let found = locate_archive(&target_dir, &config.archive_name, config.ambiguity)?;
      info!(path = %found.display(), "located archive");
      match config.cache_policy {
        CachePolicy::ReuseCached => {
          cache_archive(&found, &cache_path)?;
          (cache_path.clone(), Some(cache_path), true)
        }
        CachePolicy::AlwaysRebuild => (found, None, true),
      }
    }
  };

  let lib_dir = resolve_lib_dir(&archive_path)?;
  info!(
    lib_dir = %lib_dir.display(),
    rebuilt,
    elapsed_ms = start.elapsed().as_millis() as u64,
    "archive ready"
  );

  Ok(BuildResult {
    source_dir,
    archive_path,
    cached_archive_path,
    lib_dir,
    rebuilt,
  })
}
