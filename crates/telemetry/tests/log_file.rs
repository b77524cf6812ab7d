//! Subscriber installation with file output.
//!
//! Lives in its own test binary because the global subscriber can only be
//! installed once per process.

use mazeed_telemetry::{init_with_config, session_id, TelemetryConfig};

#[test]
fn log_file_receives_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("mazeed.log");

    let guard = init_with_config(TelemetryConfig {
        log_level: "info".to_string(),
        log_file: Some(path.clone()),
        ..TelemetryConfig::default()
    })
    .expect("first init succeeds");
    assert!(guard.is_some());

    tracing::warn!(slot = "mazeed_user_location", "Ignoring corrupt cached location");
    drop(guard);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(lines
        .iter()
        .any(|l| l["fields"]["session_id"] == session_id()));
    assert!(lines
        .iter()
        .any(|l| l["fields"]["message"] == "Ignoring corrupt cached location"
            && l["level"] == "WARN"));

    assert!(init_with_config(TelemetryConfig::default()).is_err());
}
