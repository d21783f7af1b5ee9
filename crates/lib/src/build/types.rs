use std::path::Path;

use serde::Serialize;

use crate::consts::{LIB_DIR_VAR, STATIC_VAR};
use crate::util::process::EnvOverrides;

/// Whether a previously cached archive may stand in for a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
  /// Clean and build on every invocation; nothing is cached.
  AlwaysRebuild,
  /// Skip the build when the cached archive exists. The cached copy is
  /// trusted indefinitely.
  #[default]
  ReuseCached,
}

/// What the `build` step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
  /// The cached archive at this path was found; nothing ran.
  Cached(std::path::PathBuf),
  /// The build tool cleaned and rebuilt the output tree.
  Built,
}

/// Fixed description of the nested build.
///
/// Always an optimized release build with the crate's default features
/// disabled and `features` enabled instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
  pub features: Vec<String>,
  pub env: EnvOverrides,
}

impl BuildSpec {
  /// Spec for a build whose output must land in `target_dir`.
  ///
  /// Inherited values of the exported variables are removed so an earlier
  /// `eval` of our own output cannot steer the nested `librocksdb-sys` build
  /// to a stale archive.
  pub fn new(features: Vec<String>, target_dir: &Path) -> Self {
    let env = EnvOverrides::new()
      .remove(LIB_DIR_VAR)
      .remove(STATIC_VAR)
      .set("CARGO_TARGET_DIR", target_dir.display().to_string());
    Self { features, env }
  }

  /// Arguments of the build invocation, after the program name.
  pub fn build_args(&self) -> Vec<String> {
    let mut args = vec!["build".to_string(), "--release".to_string(), "--no-default-features".to_string()];
    if !self.features.is_empty() {
      args.push("--features".to_string());
      args.push(self.features.join(","));
    }
    args
  }
}
