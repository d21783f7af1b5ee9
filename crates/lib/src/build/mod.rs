//! The external build step.
//!
//! # Submodules
//!
//! - [`cargo`] - `BuildTool` backed by the cargo command line

pub mod cargo;
mod types;

use std::path::Path;

use tracing::info;

use crate::error::PrebuildError;

pub use cargo::CargoTool;
pub use types::*;

/// An external build tool.
#[allow(async_fn_in_trait)]
pub trait BuildTool {
  /// Remove prior build state under `source_dir`.
  async fn clean(&self, source_dir: &Path, spec: &BuildSpec) -> Result<(), PrebuildError>;

  /// Run the build described by `spec` in `source_dir`.
  async fn build(&self, source_dir: &Path, spec: &BuildSpec) -> Result<(), PrebuildError>;
}

/// Produce the archive, or find that a cached one makes building unnecessary.
///
/// With [`CachePolicy::ReuseCached`] an existing file at `cache_path` skips
/// both clean and build. Otherwise the output tree is cleaned and rebuilt.
pub async fn build<T: BuildTool>(
  tool: &T,
  source_dir: &Path,
  spec: &BuildSpec,
  policy: CachePolicy,
  cache_path: &Path,
) -> Result<BuildOutcome, PrebuildError> {
  if policy == CachePolicy::ReuseCached && cache_path.is_file() {
    info!(path = %cache_path.display(), "reusing cached archive");
    return Ok(BuildOutcome::Cached(cache_path.to_path_buf()));
  }

  tool.clean(source_dir, spec).await?;
  tool.build(source_dir, spec).await?;
  Ok(BuildOutcome::Built)
}
