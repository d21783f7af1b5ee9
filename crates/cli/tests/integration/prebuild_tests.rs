//! Integration tests for the prebuild pipeline as seen from the shell.

use predicates::prelude::*;

use super::common::{ARCHIVE, BuildScript, TestEnv};

#[test]
fn always_rebuild_exports_release_directory() {
  let env = TestEnv::with_checkout(BuildScript::Release);

  let output = env
    .rocksenv_cmd()
    .arg("--always-rebuild")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let stdout = String::from_utf8(output).unwrap();
  assert_eq!(stdout, TestEnv::expected_exports(&env.canonical("src/target/release")));
  assert_eq!(
    TestEnv::log_lines(&env.cargo_log()),
    vec!["clean", "build --release --no-default-features --features lz4"]
  );
  assert!(TestEnv::log_lines(&env.git_log()).is_empty(), "existing checkout must not be cloned");
  assert!(!env.source_dir().join(ARCHIVE).exists(), "always-rebuild does not cache");
}

#[test]
fn cache_aware_run_builds_once() {
  let env = TestEnv::with_checkout(BuildScript::Release);

  let first = env.rocksenv_cmd().assert().success().get_output().stdout.clone();
  let second = env.rocksenv_cmd().assert().success().get_output().stdout.clone();

  assert_eq!(first, second);
  assert_eq!(
    String::from_utf8(first).unwrap(),
    TestEnv::expected_exports(&env.canonical("src"))
  );
  let builds = TestEnv::log_lines(&env.cargo_log())
    .into_iter()
    .filter(|line| line.starts_with("build"))
    .count();
  assert_eq!(builds, 1);
  assert!(env.source_dir().join(ARCHIVE).is_file());
}

#[test]
fn missing_checkout_is_cloned_once() {
  let env = TestEnv::without_checkout(BuildScript::Release);

  env.rocksenv_cmd().assert().success();
  env.rocksenv_cmd().assert().success();

  let clones = TestEnv::log_lines(&env.git_log());
  assert_eq!(clones.len(), 1);
  assert!(clones[0].starts_with("clone --depth=1 --recurse-submodules"));
  assert!(clones[0].contains("https://example.invalid/rust-rocksdb.git"));
  assert!(env.source_dir().is_dir());
}

#[test]
fn clone_failure_exits_without_exports() {
  let env = TestEnv::without_checkout(BuildScript::Release).with_failing_git();

  env
    .rocksenv_cmd()
    .assert()
    .code(3)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("failed to clone"));

  assert!(!env.source_dir().exists(), "partial checkout must be removed");
  assert!(TestEnv::log_lines(&env.cargo_log()).is_empty());
}

#[test]
fn build_failure_exits_without_exports() {
  let env = TestEnv::with_checkout(BuildScript::Fail);

  env
    .rocksenv_cmd()
    .assert()
    .code(4)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("linking with `cc` failed"));
}

#[test]
fn missing_archive_exits_without_exports() {
  let env = TestEnv::with_checkout(BuildScript::Nothing);

  env
    .rocksenv_cmd()
    .arg("--always-rebuild")
    .assert()
    .code(5)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("no 'libstorage.a' found"));
}

#[test]
fn ambiguous_archive_fails_unless_newest_requested() {
  let env = TestEnv::with_checkout(BuildScript::TwoCandidates);

  env
    .rocksenv_cmd()
    .arg("--always-rebuild")
    .assert()
    .code(6)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("2 candidates"));

  env
    .rocksenv_cmd()
    .args(["--always-rebuild", "--pick-newest"])
    .assert()
    .success()
    .stdout(predicate::str::contains("/release/build/sys-"));
}

#[test]
fn inherited_exports_do_not_reach_the_build() {
  let env = TestEnv::with_checkout(BuildScript::Release);

  env
    .rocksenv_cmd()
    .env("ROCKSDB_LIB_DIR", "/stale/lib")
    .env("ROCKSDB_STATIC", "1")
    .assert()
    .success();
}

#[test]
fn fish_syntax() {
  let env = TestEnv::with_checkout(BuildScript::Release);

  let output = env
    .rocksenv_cmd()
    .args(["--shell", "fish"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  assert_eq!(
    String::from_utf8(output).unwrap(),
    format!(
      "set -gx ROCKSDB_LIB_DIR \"{}\"\nset -gx ROCKSDB_STATIC \"1\"\n",
      env.canonical("src").display()
    )
  );
}

#[test]
fn json_report() {
  let env = TestEnv::with_checkout(BuildScript::Release);

  let output = env
    .rocksenv_cmd()
    .args(["--format", "json"])
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
  let lib_dir = env.canonical("src").display().to_string();
  assert_eq!(report["lib_dir"], lib_dir.as_str());
  assert_eq!(report["rebuilt"], true);
  assert_eq!(report["env"]["ROCKSDB_LIB_DIR"], lib_dir.as_str());
  assert_eq!(report["env"]["ROCKSDB_STATIC"], "1");
}
