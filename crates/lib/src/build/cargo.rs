//! Cargo as the external build tool.

use std::path::Path;

use crate::build::{BuildSpec, BuildTool};
use crate::error::PrebuildError;
use crate::util::process::run_command;

/// Runs `cargo clean` and `cargo build` in the checkout.
#[derive(Debug, Clone)]
pub struct CargoTool {
  program: String,
}

impl CargoTool {
  pub fn new(program: impl Into<String>) -> Self {
    Self { program: program.into() }
  }
}

impl Default for CargoTool {
  fn default() -> Self {
    Self::new("cargo")
  }
}

impl BuildTool for CargoTool {
  async fn clean(&self, source_dir: &Path, spec: &BuildSpec) -> Result<(), PrebuildError> {
    run_command(&self.program, &["clean".to_string()], source_dir, &spec.env)
      .await
      .map_err(PrebuildError::BuildFailed)?;
    Ok(())
  }

  async fn build(&self, source_dir: &Path, spec: &BuildSpec) -> Result<(), PrebuildError> {
    run_command(&self.program, &spec.build_args(), source_dir, &spec.env)
      .await
      .map_err(PrebuildError::BuildFailed)?;
    Ok(())
  }
}
