mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rocksenv_lib::PrebuildError;
use rocksenv_lib::platform::Shell;

use crate::cmd::{PrebuildArgs, cmd_prebuild};
use crate::output::OutputFormat;

/// Build RocksDB once and print the variables that make cargo link it statically.
///
/// Usage: eval "$(rocksenv)"
#[derive(Parser)]
#[command(name = "rocksenv")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Clean and rebuild even when a cached archive exists; nothing is cached
  #[arg(long)]
  always_rebuild: bool,

  /// Checkout location (overrides ROCKSENV_SOURCE_DIR)
  #[arg(long)]
  source_dir: Option<PathBuf>,

  /// Syntax of the printed assignments: sh, bash, zsh, fish, powershell
  #[arg(long, default_value_t = Shell::Sh)]
  shell: Shell,

  /// When several archives match, take the newest instead of failing
  #[arg(long)]
  pick_newest: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  // stdout carries only the export lines; all logging goes to stderr.
  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = PrebuildArgs {
    always_rebuild: cli.always_rebuild,
    source_dir: cli.source_dir,
    shell: cli.shell,
    pick_newest: cli.pick_newest,
    format: cli.format,
  };

  match cmd_prebuild(args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      output::print_error(&format!("{:#}", err));
      ExitCode::from(exit_code(&err))
    }
  }
}

fn exit_code(err: &anyhow::Error) -> u8 {
  err
    .chain()
    .find_map(|cause| cause.downcast_ref::<PrebuildError>())
    .map(PrebuildError::exit_code)
    .unwrap_or(1)
}
