//! External process execution.
//!
//! Every collaborator this crate drives (git, cargo) is a child process. The
//! child's stdout and stderr are always captured: this tool's own stdout is
//! reserved for the export lines, so nothing a nested build prints may leak
//! into it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Number of trailing stderr lines kept in a failure message.
const STDERR_TAIL_LINES: usize = 20;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum CommandError {
  /// The program could not be started (missing binary, permissions).
  #[error("failed to start `{command}`: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// The program ran and exited unsuccessfully.
  #[error("`{command}` exited with code {code:?}{}", stderr_excerpt(.stderr))]
  Exit {
    command: String,
    code: Option<i32>,
    stderr: String,
  },
}

/// Explicit environment changes applied to one child process.
///
/// The parent's environment is never mutated; variables are removed from or
/// added to the child's inherited environment only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
  /// Variables removed from the inherited environment.
  pub remove: BTreeSet<String>,
  /// Variables set (after removal).
  pub set: BTreeMap<String, String>,
}

impl EnvOverrides {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn remove(mut self, name: impl Into<String>) -> Self {
    self.remove.insert(name.into());
    self
  }

  pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.set.insert(name.into(), value.into());
    self
  }

  /// Look up a variable this override set explicitly.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.set.get(name).map(String::as_str)
  }

  fn apply(&self, command: &mut Command) {
    for name in &self.remove {
      command.env_remove(name);
    }
    for (name, value) in &self.set {
      command.env(name, value);
    }
  }
}

/// Run `program args...` in `cwd` and wait for it.
///
/// Returns the captured stdout (trimmed) on success.
pub async fn run_command(
  program: &str,
  args: &[String],
  cwd: &Path,
  env: &EnvOverrides,
) -> Result<String, CommandError> {
  let command_line = display_command(program, args);
  info!(cmd = %command_line, cwd = %cwd.display(), "running");

  let mut command = Command::new(program);
  command
    .args(args)
    .current_dir(cwd)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true);
  env.apply(&mut command);

  let output = command.output().await.map_err(|source| CommandError::Spawn {
    command: command_line.clone(),
    source,
  })?;

  let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
  let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

  if !stdout.is_empty() {
    debug!(stdout = %stdout, "command stdout");
  }
  if !stderr.is_empty() {
    debug!(stderr = %stderr, "command stderr");
  }

  if !output.status.success() {
    return Err(CommandError::Exit {
      command: command_line,
      code: output.status.code(),
      stderr,
    });
  }

  Ok(stdout)
}

fn display_command(program: &str, args: &[String]) -> String {
  std::iter::once(program)
    .chain(args.iter().map(String::as_str))
    .collect::<Vec<_>>()
    .join(" ")
}

fn stderr_excerpt(stderr: &str) -> String {
  if stderr.is_empty() {
    return String::new();
  }
  let lines: Vec<&str> = stderr.lines().collect();
  let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
  format!("\n{}", lines[start..].join("\n"))
}
