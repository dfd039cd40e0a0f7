//! Runs the compiled binary against presets and scenario files.

use std::path::Path;
use std::process::Command;

fn forecaster() -> Command {
    Command::new(env!("CARGO_BIN_EXE_demand-forecast"))
}

#[test]
fn preset_run_prints_metrics_and_forecast() {
    let output = forecaster()
        .args(["--preset", "reproducible", "--horizon", "5"])
        .output()
        .expect("binary should run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- Model Performance ---"));
    assert!(stdout.contains("Mean Absolute Error (MAE):"));
    assert!(stdout.contains("Predicted Demand"));
    assert!(stdout.contains("2024-01-05"));
    assert!(!stdout.contains("2024-01-06"));
}

#[test]
fn scenario_file_writes_forecast_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("forecast.csv");
    let scenario = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/compact_seeded.toml");

    let status = forecaster()
        .arg("--config")
        .arg(&scenario)
        .arg("--forecast-out")
        .arg(&out)
        .status()
        .expect("binary should run");
    assert!(status.success());

    let csv = std::fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("date,predicted_demand"));
    // 90 days from 2023-01-01 end on 2023-03-31
    assert!(lines.next().unwrap().starts_with("2023-04-01,"));
    assert_eq!(csv.lines().count(), 1 + 14);
}

#[test]
fn seeded_runs_print_identical_reports() {
    let run = || {
        forecaster()
            .args(["--preset", "pune", "--seed", "17"])
            .output()
            .expect("binary should run")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn invalid_horizon_exits_with_error() {
    let output = forecaster()
        .args(["--preset", "pune", "--horizon", "31"])
        .output()
        .expect("binary should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("horizon"));
}

#[test]
fn unknown_preset_exits_with_error() {
    let output = forecaster()
        .args(["--preset", "mumbai"])
        .output()
        .expect("binary should run");
    assert!(!output.status.success());
}
