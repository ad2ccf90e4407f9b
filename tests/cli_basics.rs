use assert_cmd::{cargo}; // handy crate for testing CLIs
use std::path::PathBuf;

/// Empty HOME so no user config file leaks into the run.
fn scratch_home(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("aicommit-cli-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage"))
        .stdout(predicates::str::contains("--list"));
}

#[test]
fn prints_version() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_credential_exits_non_zero() {
    let home = scratch_home("nokey");
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.current_dir(&home)
        .env("HOME", &home)
        .env_remove("GOOGLE_GENERATIVE_AI_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("AI_COMMIT_PROVIDER")
        .env_remove("AI_COMMIT_MODEL")
        .assert()
        .failure()
        .stderr(predicates::str::contains("GOOGLE_GENERATIVE_AI_API_KEY"));
}

#[test]
fn rejects_unknown_provider() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.args(["--provider", "bard"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("invalid value"));
}
