//! Implementation of the default `rocksenv` command.
//!
//! Runs the prebuild pipeline and prints the environment assignments to
//! stdout. Nothing is printed to stdout unless every step succeeded.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use rocksenv_lib::build::{CachePolicy, CargoTool};
use rocksenv_lib::config::PrebuildConfig;
use rocksenv_lib::export::{emit_environment, export_vars};
use rocksenv_lib::locate::AmbiguityPolicy;
use rocksenv_lib::pipeline::{self, BuildResult};
use rocksenv_lib::platform::Shell;
use rocksenv_lib::source::GitCloner;

use crate::output::{OutputFormat, print_json};

pub struct PrebuildArgs {
  pub always_rebuild: bool,
  pub source_dir: Option<PathBuf>,
  pub shell: Shell,
  pub pick_newest: bool,
  pub format: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  #[serde(flatten)]
  result: &'a BuildResult,
  env: BTreeMap<&'static str, String>,
}

/// Execute the prebuild command.
///
/// Flags are applied on top of [`PrebuildConfig::from_env_with`].
///
/// # Errors
///
/// Returns the failing step's [`rocksenv_lib::PrebuildError`] in the error
/// chain, which `main` maps to the exit code.
pub fn cmd_prebuild(args: PrebuildArgs) -> Result<()> {
  let mut config = PrebuildConfig::from_env_with(args.source_dir).context("Failed to load configuration")?;
  if args.always_rebuild {
    config.cache_policy = CachePolicy::AlwaysRebuild;
  }
  if args.pick_newest {
    config.ambiguity = AmbiguityPolicy::Newest;
  }

  debug!(?config, "resolved configuration");

  let cloner = GitCloner::new(config.git.clone());
  let tool = CargoTool::new(config.cargo.clone());

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let result = rt
    .block_on(pipeline::run(&config, &cloner, &tool))
    .context("Prebuild failed")?;

  if args.format.is_json() {
    let report = JsonReport {
      result: &result,
      env: export_vars(&result.lib_dir).into_iter().collect(),
    };
    return print_json(&report);
  }

  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  emit_environment(&mut out, &result.lib_dir, args.shell).context("Failed to print environment")?;
  out.flush().context("Failed to flush stdout")?;
  Ok(())
}
