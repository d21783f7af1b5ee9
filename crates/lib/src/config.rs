//! Runtime configuration.
//!
//! Compiled-in defaults, overlaid by `ROCKSENV_*` environment variables. The
//! CLI applies its flags on top of the result.

use std::path::PathBuf;

use crate::build::CachePolicy;
use crate::consts::{DEFAULT_ARCHIVE_NAME, DEFAULT_FEATURES, DEFAULT_REPO_URL};
use crate::error::PrebuildError;
use crate::locate::AmbiguityPolicy;
use crate::platform::paths;

pub const ENV_REPO_URL: &str = "ROCKSENV_REPO_URL";
pub const ENV_SOURCE_DIR: &str = "ROCKSENV_SOURCE_DIR";
pub const ENV_FEATURES: &str = "ROCKSENV_FEATURES";
pub const ENV_ARCHIVE: &str = "ROCKSENV_ARCHIVE";
pub const ENV_CARGO: &str = "ROCKSENV_CARGO";
pub const ENV_GIT: &str = "ROCKSENV_GIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrebuildConfig {
  /// Remote cloned when the checkout is missing.
  pub repo_url: String,
  /// Checkout location; persists across runs.
  pub source_dir: PathBuf,
  /// Features enabled in place of the crate defaults.
  pub features: Vec<String>,
  /// File name searched for in the build output tree.
  pub archive_name: String,
  /// Build tool program.
  pub cargo: String,
  /// Version-control program.
  pub git: String,
  pub cache_policy: CachePolicy,
  pub ambiguity: AmbiguityPolicy,
}

impl PrebuildConfig {
  /// Defaults with an explicit checkout location.
  pub fn with_source_dir(source_dir: impl Into<PathBuf>) -> Self {
    Self {
      repo_url: DEFAULT_REPO_URL.to_string(),
      source_dir: source_dir.into(),
      features: DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect(),
      archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
      cargo: "cargo".to_string(),
      git: "git".to_string(),
      cache_policy: CachePolicy::default(),
      ambiguity: AmbiguityPolicy::default(),
    }
  }

  /// Defaults overlaid with the `ROCKSENV_*` variables. Empty values count
  /// as unset.
  pub fn from_env() -> Result<Self, PrebuildError> {
    Self::from_env_with(None)
  }

  /// Like [`PrebuildConfig::from_env`], with an explicit checkout location
  /// taking precedence over `ROCKSENV_SOURCE_DIR` and the cache default.
  pub fn from_env_with(source_dir: Option<PathBuf>) -> Result<Self, PrebuildError> {
    let source_dir = match source_dir.or_else(|| var(ENV_SOURCE_DIR).map(PathBuf::from)) {
      Some(dir) => dir,
      None => paths::default_source_dir().ok_or_else(|| {
        PrebuildError::Config(format!(
          "cannot determine a cache directory (HOME and XDG_CACHE_HOME are unset); set {}",
          ENV_SOURCE_DIR
        ))
      })?,
    };

    let mut config = Self::with_source_dir(source_dir);
    if let Some(url) = var(ENV_REPO_URL) {
      config.repo_url = url;
    }
    if let Some(features) = var(ENV_FEATURES) {
      config.features = parse_features(&features);
    }
    if let Some(name) = var(ENV_ARCHIVE) {
      config.archive_name = name;
    }
    if let Some(cargo) = var(ENV_CARGO) {
      config.cargo = cargo;
    }
    if let Some(git) = var(ENV_GIT) {
      config.git = git;
    }

    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), PrebuildError> {
    if self.features.is_empty() {
      return Err(PrebuildError::Config("feature list is empty".to_string()));
    }
    if self.archive_name.is_empty() || self.archive_name.contains(['/', '\\']) {
      return Err(PrebuildError::Config(format!(
        "archive name '{}' must be a bare file name",
        self.archive_name
      )));
    }
    if self.repo_url.is_empty() {
      return Err(PrebuildError::Config("repository URL is empty".to_string()));
    }
    Ok(())
  }
}

fn var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_features(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|f| !f.is_empty())
    .map(str::to_string)
    .collect()
}
