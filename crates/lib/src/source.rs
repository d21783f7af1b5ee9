//! Source checkout management.
//!
//! The checkout is created once and reused: an existing directory is never
//! touched again, whatever its contents.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::PrebuildError;
use crate::util::process::{EnvOverrides, run_command};

/// A version-control clone operation.
#[allow(async_fn_in_trait)]
pub trait Cloner {
  /// Clone `url` into `dest`. `dest` does not exist when this is called.
  async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Clones with the `git` command line.
///
/// Submodules are fetched too: the RocksDB C++ sources live in a submodule of
/// the bindings repository.
#[derive(Debug, Clone)]
pub struct GitCloner {
  program: String,
}

impl GitCloner {
  pub fn new(program: impl Into<String>) -> Self {
    Self { program: program.into() }
  }
}

impl Default for GitCloner {
  fn default() -> Self {
    Self::new("git")
  }
}

impl Cloner for GitCloner {
  async fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let parent = match dest.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };
    let args = vec![
      "clone".to_string(),
      "--depth=1".to_string(),
      "--recurse-submodules".to_string(),
      "--shallow-submodules".to_string(),
      url.to_string(),
      dest.display().to_string(),
    ];
    // Never block on a credential prompt; stdin is closed anyway.
    let env = EnvOverrides::new().set("GIT_TERMINAL_PROMPT", "0");
    run_command(&self.program, &args, parent, &env).await?;
    Ok(())
  }
}

/// Make sure `target_dir` holds a checkout of `repo_url`.
///
/// No-op when `target_dir` exists. Otherwise clones exactly once; on failure
/// any partially created directory is removed so the next run clones again.
pub async fn ensure_source<C: Cloner>(repo_url: &str, target_dir: &Path, cloner: &C) -> Result<(), PrebuildError> {
  if target_dir.exists() {
    debug!(path = %target_dir.display(), "source checkout present");
    return Ok(());
  }

  let unavailable = |source: Box<dyn std::error::Error + Send + Sync>| PrebuildError::SourceUnavailable {
    url: repo_url.to_string(),
    path: target_dir.to_path_buf(),
    source,
  };

  if let Some(parent) = target_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).map_err(|e| unavailable(Box::new(e)))?;
  }

  info!(url = repo_url, path = %target_dir.display(), "cloning source");
  if let Err(e) = cloner.clone_repo(repo_url, target_dir).await {
    if target_dir.exists() {
      if let Err(cleanup) = std::fs::remove_dir_all(target_dir) {
        warn!(path = %target_dir.display(), error = %cleanup, "failed to remove partial checkout");
      }
    }
    return Err(unavailable(e));
  }

  if !target_dir.is_dir() {
    return Err(unavailable("clone finished but the checkout directory is missing".into()));
  }

  Ok(())
}
