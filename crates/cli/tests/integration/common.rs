//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Archive name used by every scenario.
pub const ARCHIVE: &str = "libstorage.a";

/// What the fake cargo does on `build`.
pub enum BuildScript {
  /// Writes the archive to `<target>/release/libstorage.a`.
  Release,
  /// Writes the archive into two build-script output directories.
  TwoCandidates,
  /// Succeeds without producing anything.
  Nothing,
  /// Fails like a compile error.
  Fail,
}

impl BuildScript {
  fn body(&self) -> &'static str {
    match self {
      BuildScript::Release => {
        r#"mkdir -p "$CARGO_TARGET_DIR/release" && printf '!<arch>\n' > "$CARGO_TARGET_DIR/release/libstorage.a""#
      }
      BuildScript::TwoCandidates => {
        r#"for d in a b; do mkdir -p "$CARGO_TARGET_DIR/release/build/sys-$d/out"; printf '!<arch>\n' > "$CARGO_TARGET_DIR/release/build/sys-$d/out/libstorage.a"; done"#
      }
      BuildScript::Nothing => ":",
      BuildScript::Fail => "echo 'error: linking with `cc` failed' >&2; exit 101",
    }
  }
}

const CARGO_TEMPLATE: &str = r#"[ -z "${ROCKSDB_LIB_DIR+x}" ] || { echo "ROCKSDB_LIB_DIR leaked into build" >&2; exit 42; }
[ -z "${ROCKSDB_STATIC+x}" ] || { echo "ROCKSDB_STATIC leaked into build" >&2; exit 42; }
echo "$*" >> '@LOG@'
echo "   Compiling librocksdb-sys v0.17.0"
case "$1" in
  clean) rm -rf "$CARGO_TARGET_DIR" ;;
  build) @BUILD@ ;;
esac
"#;

const GIT_OK: &str = r#"echo "$*" >> '@LOG@'
for last; do :; done
mkdir -p "$last"
echo "Cloning into '$last'..."
"#;

const GIT_FAIL: &str = r#"echo "$*" >> '@LOG@'
for last; do :; done
mkdir -p "$last"
echo "fatal: unable to access remote" >&2
exit 128
"#;

/// Isolated test environment.
///
/// Each test gets its own checkout location, scripted tools, and logs.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Environment whose checkout already exists.
  pub fn with_checkout(build: BuildScript) -> Self {
    let env = Self::without_checkout(build);
    std::fs::create_dir_all(env.source_dir()).unwrap();
    env
  }

  /// Environment whose checkout must be cloned first.
  pub fn without_checkout(build: BuildScript) -> Self {
    let env = Self { temp: TempDir::new().unwrap() };
    let cargo = CARGO_TEMPLATE
      .replace("@LOG@", &env.cargo_log().display().to_string())
      .replace("@BUILD@", build.body());
    env.write_script("fake-cargo", &cargo);
    env.write_script("fake-git", &GIT_OK.replace("@LOG@", &env.git_log().display().to_string()));
    env
  }

  /// Replace the scripted git with one that fails.
  pub fn with_failing_git(self) -> Self {
    self.write_script("fake-git", &GIT_FAIL.replace("@LOG@", &self.git_log().display().to_string()));
    self
  }

  fn write_script(&self, name: &str, body: &str) -> PathBuf {
    let path = self.temp.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  pub fn source_dir(&self) -> PathBuf {
    self.temp.path().join("src")
  }

  pub fn cargo_log(&self) -> PathBuf {
    self.temp.path().join("cargo.log")
  }

  pub fn git_log(&self) -> PathBuf {
    self.temp.path().join("git.log")
  }

  /// Lines logged by the scripted tool, empty if it never ran.
  pub fn log_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Canonical form of a path below the temp directory.
  pub fn canonical(&self, relative: &str) -> PathBuf {
    dunce::canonicalize(self.temp.path().join(relative)).unwrap()
  }

  /// The two lines expected on stdout for `lib_dir`.
  pub fn expected_exports(lib_dir: &Path) -> String {
    format!(
      "export ROCKSDB_LIB_DIR=\"{}\"\nexport ROCKSDB_STATIC=\"1\"\n",
      lib_dir.display()
    )
  }

  /// Get a pre-configured Command for the rocksenv binary.
  ///
  /// Points every `ROCKSENV_*` setting at this environment and removes
  /// inherited values that would change the outcome.
  pub fn rocksenv_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("rocksenv");
    cmd.env("ROCKSENV_SOURCE_DIR", self.source_dir());
    cmd.env("ROCKSENV_CARGO", self.temp.path().join("fake-cargo"));
    cmd.env("ROCKSENV_GIT", self.temp.path().join("fake-git"));
    cmd.env("ROCKSENV_ARCHIVE", ARCHIVE);
    cmd.env("ROCKSENV_REPO_URL", "https://example.invalid/rust-rocksdb.git");
    cmd.env("XDG_CACHE_HOME", self.temp.path().join("cache"));
    cmd.env_remove("ROCKSENV_FEATURES");
    cmd.env_remove("ROCKSDB_LIB_DIR");
    cmd.env_remove("ROCKSDB_STATIC");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
