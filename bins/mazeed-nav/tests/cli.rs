//! End-to-end tests for the mazeed-nav binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Temp dir with a config that stores the cache inside it and points
    /// routing at a closed local port.
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = dir.path().join("store");
        let config = format!(
            "[location]\nstorage_dir = {:?}\n\n[routing]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n",
            storage.display().to_string()
        );
        std::fs::write(dir.path().join("mazeed.toml"), config).unwrap();
        Self { dir }
    }

    fn config_path(&self) -> String {
        self.dir.path().join("mazeed.toml").display().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("mazeed-nav").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .env_remove("MAZEED_CONFIG")
            .env_remove("MAZEED_ROUTING_URL")
            .env_remove("MAZEED_ROUTING_PROFILE")
            .env_remove("MAZEED_ROUTING_TIMEOUT_SECS")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    fn store_dir(&self) -> &Path {
        self.dir.path()
    }
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn distance_prints_formatted_value() {
    Workspace::new()
        .cmd()
        .args(["distance", "0,0", "0,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("111.2km"));
}

#[test]
fn distance_json() {
    let output = Workspace::new()
        .cmd()
        .args(["distance", "0,0", "0,1", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    let meters = json["distance_meters"].as_f64().unwrap();
    assert!((meters - 111_195.0).abs() < 1.0);
    assert_eq!(json["distance"], "111.2km");
}

#[test]
fn invalid_coordinate_is_a_usage_error() {
    Workspace::new()
        .cmd()
        .args(["distance", "91,0", "0,0"])
        .assert()
        .code(2);
}

#[test]
fn format_subcommands() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["format", "distance", "1523"])
        .assert()
        .success()
        .stdout("1.5km\n");
    ws.cmd()
        .args(["format", "distance", "850"])
        .assert()
        .success()
        .stdout("850m\n");
    ws.cmd()
        .args(["format", "duration", "4500"])
        .assert()
        .success()
        .stdout("1h 15m\n");
    ws.cmd()
        .args(["format", "duration", "59"])
        .assert()
        .success()
        .stdout("1 min\n");
}

#[test]
fn format_rejects_non_finite_input() {
    Workspace::new()
        .cmd()
        .args(["format", "distance", "NaN"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E6001"));
}

#[test]
fn locate_without_capability_or_cache_fails() {
    Workspace::new()
        .cmd()
        .arg("locate")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn json_errors_are_reported_as_error_reports() {
    let output = Workspace::new()
        .cmd()
        .env("RUST_LOG", "off")
        .args(["locate", "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8(output.stderr).unwrap();
    let report: serde_json::Value =
        serde_json::from_str(stderr.lines().last().expect("report line")).unwrap();
    assert_eq!(report["code"], "CAPABILITY_UNAVAILABLE");
    assert_eq!(report["code_str"], "E9001");
    assert_eq!(report["category"], "Location");
    assert!(report["suggestion"].is_string());
}

#[test]
fn locate_caches_device_fix_until_cleared() {
    let ws = Workspace::new();

    let first = ws
        .cmd()
        .args(["locate", "--at", "24.7136,46.6753", "--json"])
        .output()
        .unwrap();
    assert!(first.status.success());
    let first = stdout_json(&first);
    assert_eq!(first["source"], "device");
    assert_eq!(first["latitude"], 24.7136);

    assert!(ws.store_dir().join("store/mazeed_user_location.json").exists());

    let second = ws.cmd().args(["locate", "--json"]).output().unwrap();
    assert!(second.status.success());
    let second = stdout_json(&second);
    assert_eq!(second["source"], "cache");
    assert_eq!(second["timestamp"], first["timestamp"]);

    ws.cmd()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared cached location"));

    ws.cmd().arg("locate").assert().code(4);
}

#[test]
fn route_falls_back_to_straight_line() {
    let output = Workspace::new()
        .cmd()
        .args(["route", "0,0", "0,1", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["source"], "straight_line");
    assert_eq!(json["distance"], "111.2km");
}

#[test]
fn route_reports_fallback_metric() {
    Workspace::new()
        .cmd()
        .args(["--metrics", "route", "0,0", "0,1", "--json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"routing.fallback\": 1"));
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let ws = Workspace::new();
    Command::cargo_bin("mazeed-nav")
        .unwrap()
        .current_dir(ws.store_dir())
        .args(["--config", "does-not-exist.toml", "distance", "0,0", "0,1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("E3001"));
}
