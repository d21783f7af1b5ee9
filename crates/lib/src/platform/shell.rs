//! Shell syntax for the emitted environment assignments.

use std::fmt;
use std::str::FromStr;

/// Supported shell types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shell {
  #[default]
  Sh,
  Bash,
  Zsh,
  Fish,
  PowerShell,
}

impl Shell {
  /// Get the shell name as a string
  pub fn as_str(&self) -> &'static str {
    match self {
      Shell::Sh => "sh",
      Shell::Bash => "bash",
      Shell::Zsh => "zsh",
      Shell::Fish => "fish",
      Shell::PowerShell => "powershell",
    }
  }

  /// Generate an export statement for setting an environment variable
  ///
  /// The value is always double-quoted with the characters the shell would
  /// expand inside double quotes escaped, so the line is safe to `eval`.
  pub fn export_var(&self, name: &str, value: &str) -> String {
    match self {
      Shell::Fish => format!("set -gx {} {}", name, quote(value, '\\', &['\\', '"', '$'])),
      Shell::PowerShell => format!("$env:{} = {}", name, quote(value, '`', &['`', '"', '$'])),
      Shell::Sh | Shell::Bash | Shell::Zsh => {
        format!("export {}={}", name, quote(value, '\\', &['\\', '"', '$', '`']))
      }
    }
  }
}

fn quote(value: &str, escape: char, special: &[char]) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for c in value.chars() {
    if special.contains(&c) {
      quoted.push(escape);
    }
    quoted.push(c);
  }
  quoted.push('"');
  quoted
}

impl fmt::Display for Shell {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Shell {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "sh" => Ok(Shell::Sh),
      "bash" => Ok(Shell::Bash),
      "zsh" => Ok(Shell::Zsh),
      "fish" => Ok(Shell::Fish),
      "powershell" | "pwsh" => Ok(Shell::PowerShell),
      _ => Err(format!(
        "unknown shell '{}'. Supported: sh, bash, zsh, fish, powershell",
        s
      )),
    }
  }
}
