// tests/config_tests.rs
//! `typofix config` tests.

use assert_cmd::Command;
use assert_fs::assert::PathAssert;
use assert_fs::fixture::{FileWriteStr, PathChild, PathCreateDir};
use predicates::prelude::*;
use predicates::str::contains;
use typofix::config::{Config, RECOMMENDED_MODELS};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn config_cmd(tmp: &assert_fs::TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("typofix")?;
    cmd.env("CLICOLOR", "0")
        .env("TYPOFIX_CONFIG", tmp.child("typofix/config.toml").path())
        .arg("config");
    Ok(cmd)
}

#[test]
fn report_without_config_file() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;

    config_cmd(&tmp)?
        .assert()
        .success()
        .stdout(contains("Current Configuration:"))
        .stdout(contains("API Key: Not set"))
        .stdout(contains(format!("Model: {}", RECOMMENDED_MODELS[0])))
        .stdout(contains("Recommended Models:"));

    tmp.child("typofix/config.toml")
        .assert(predicate::path::missing());

    tmp.close()?;
    Ok(())
}

#[test]
fn api_key_is_saved_and_masked() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;

    config_cmd(&tmp)?
        .args(["--api-key", "sk-abcdef9876"])
        .assert()
        .success()
        .stdout(contains("API key updated."));

    let saved = Config::load_from(tmp.child("typofix/config.toml").path());
    assert_eq!(saved.api_key.as_deref(), Some("sk-abcdef9876"));
    assert_eq!(saved.model, RECOMMENDED_MODELS[0]);

    config_cmd(&tmp)?
        .assert()
        .success()
        .stdout(contains("API Key: ********9876"))
        .stdout(contains("sk-abcdef").not());

    tmp.close()?;
    Ok(())
}

#[test]
fn unrecommended_model_warns_and_persists() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;
    tmp.child("typofix").create_dir_all()?;
    tmp.child("typofix/config.toml")
        .write_str("api_key = \"sk-keep\"\nmodel = \"gpt-4o\"\n")?;

    config_cmd(&tmp)?
        .args(["--model", "foo"])
        .assert()
        .success()
        .stdout(contains("Warning: foo is not in the recommended list"))
        .stdout(contains("Model updated to foo."));

    let saved = Config::load_from(tmp.child("typofix/config.toml").path());
    assert_eq!(saved.model, "foo");
    assert_eq!(saved.api_key.as_deref(), Some("sk-keep"));

    tmp.close()?;
    Ok(())
}

#[test]
fn recommended_model_has_no_warning() -> TestResult {
    let tmp = assert_fs::TempDir::new()?;

    config_cmd(&tmp)?
        .args(["--model", "gpt-4.1"])
        .assert()
        .success()
        .stdout(contains("Warning").not())
        .stdout(contains("Model updated to gpt-4.1."));

    tmp.close()?;
    Ok(())
}
