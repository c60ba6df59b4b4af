mod common;

use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("uptime-charts").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("uptime-charts"));
}

#[test]
fn cli_plots_exports_and_prints_stats() {
    let dir = tempdir().unwrap();
    let source = common::fetch_result(&["sydney", "oslo"], 4, Utc::now());
    let url = common::serve(200, &common::to_json(&source), 1);
    let full = dir.path().join("full.svg");
    let compact = dir.path().join("compact.svg");
    let out = dir.path().join("data.csv");

    let mut cmd = Command::cargo_bin("uptime-charts").unwrap();
    cmd.args(["plot", "--url", &url, "--metric", "connect", "--stats"])
        .arg("--full")
        .arg(&full)
        .arg("--compact")
        .arg(&compact)
        .arg("--out")
        .arg(&out);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sydney  count=4"))
        .stdout(predicate::str::contains("oslo  count=4"));

    assert!(full.exists());
    assert!(compact.exists());
    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("location,time,value"));
    assert_eq!(csv.lines().count(), 1 + 8);
}

#[test]
fn cli_survives_a_failing_endpoint() {
    let dir = tempdir().unwrap();
    let url = common::serve(500, "", 1);
    let mut cmd = Command::cargo_bin("uptime-charts").unwrap();
    cmd.args(["plot", "--url", &url])
        .arg("--full")
        .arg(dir.path().join("full.svg"))
        .arg("--compact")
        .arg(dir.path().join("compact.svg"));
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("No data from"));
}

#[test]
fn cli_rejects_bad_base_color() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("uptime-charts").unwrap();
    cmd.args(["plot", "--url", "http://127.0.0.1:9/", "--base-color", "chartreuse"])
        .arg("--full")
        .arg(dir.path().join("full.svg"))
        .arg("--compact")
        .arg(dir.path().join("compact.svg"));
    cmd.assert().failure();
}

#[test]
fn cli_rejects_an_out_of_range_window() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("uptime-charts").unwrap();
    cmd.args(["plot", "--url", "http://127.0.0.1:9/", "--window-days", "200000000000000"])
        .arg("--full")
        .arg(dir.path().join("full.svg"))
        .arg("--compact")
        .arg(dir.path().join("compact.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn cli_with_every_location_ignored_is_not_a_failed_fetch() {
    let dir = tempdir().unwrap();
    let source = common::fetch_result(&["bogota", "bangkok"], 3, Utc::now());
    let url = common::serve(200, &common::to_json(&source), 1);
    let mut cmd = Command::cargo_bin("uptime-charts").unwrap();
    cmd.args(["plot", "--url", &url])
        .arg("--full")
        .arg(dir.path().join("full.svg"))
        .arg("--compact")
        .arg(dir.path().join("compact.svg"));
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("No data from").not())
        .stderr(predicate::str::contains("Wrote"));
}
