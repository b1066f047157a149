//! Loading simulation settings from hyposim.toml
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use hyposim::config::{ConfigError, SimulationConfig, TestType, Variant};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
[simulation]
sample_size = 1000
observed_proportion = 0.45
null_hypothesis = 0.5
simulation_size = 1500
test_type = "twosided"

[display]
show_threshold = true
"#;

#[test]
fn test_config_from_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("hyposim.toml");
    fs::write(&path, CONFIG).unwrap();

    let config = SimulationConfig::from_file(&path).unwrap();
    let params = config.validate().unwrap();
    assert_eq!(params.sample_size, 1000);
    assert_eq!(params.simulation_size, 1500);
    assert_eq!(params.test_type, TestType::TwoSided);
    assert_eq!(params.variant, Variant::Revised);
    assert!(config.display.show_threshold);
}

#[test]
fn test_missing_config_file() {
    let tmp_dir = TempDir::new().unwrap();
    let err = SimulationConfig::from_file(tmp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_binary_reads_config_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("hyposim.toml");
    fs::write(&path, CONFIG).unwrap();

    Command::cargo_bin("hyposim")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample size n:            1000"))
        .stdout(predicate::str::contains("X ≤ 450 or X ≥ 550"))
        .stdout(predicate::str::contains("/1500="));
}

#[test]
fn test_flags_override_config_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("hyposim.toml");
    fs::write(&path, CONFIG).unwrap();

    Command::cargo_bin("hyposim")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["--test", "right", "--simulations", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X ≥ 450"))
        .stdout(predicate::str::contains("/300="));
}

#[test]
fn test_binary_rejects_malformed_config() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("broken.toml");
    fs::write(&path, "[simulation\nsample_size = ").unwrap();

    Command::cargo_bin("hyposim")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}
