//! Host-facing concerns: well-known directories and shell syntax.

pub mod paths;
pub mod shell;

pub use shell::Shell;
