use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use intake_core::models::analysis::{AnalysisSnapshot, RiskLevel};
use uuid::Uuid;

fn write_snapshot(dir: &Path, name: &str, offset: i64, overall: f64) -> PathBuf {
    let snapshot = AnalysisSnapshot {
        session_id: Uuid::new_v4(),
        client_id: Uuid::nil(),
        completed_at: jiff::Timestamp::from_second(1_700_000_000 + offset).unwrap(),
        overall_score: overall,
        module_scores: BTreeMap::from([("ENERGY".to_string(), overall)]),
        patterns: Vec::new(),
        under_reporting_risk: 0.2,
        risk_level: RiskLevel::Moderate,
        questions_asked: 30,
        questions_saved: 10,
        skipped_responses: 0,
    };
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();
    path
}

fn run_aggregate(files: &[PathBuf], config: Option<&Path>) -> serde_json::Value {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_intake-replay"));
    cmd.arg("aggregate").args(files);
    if let Some(path) = config {
        cmd.arg("--config").arg(path);
    }
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "aggregate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn aggregate_uses_default_trend_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write_snapshot(dir.path(), "first.json", 0, 50.0),
        write_snapshot(dir.path(), "second.json", 3600, 47.0),
    ];

    let result = run_aggregate(&files, None);

    assert_eq!(result["overall_trend"], "stable");
}

#[test]
fn aggregate_honours_configured_trend_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        write_snapshot(dir.path(), "first.json", 0, 50.0),
        write_snapshot(dir.path(), "second.json", 3600, 47.0),
    ];
    let config = dir.path().join("engine.json");
    std::fs::write(&config, r#"{"config_version": 2, "trend_change": 0.05}"#).unwrap();

    let result = run_aggregate(&files, Some(&config));

    assert_eq!(result["overall_trend"], "improving");
    assert_eq!(result["module_trends"]["ENERGY"], "improving");
}

#[test]
fn aggregate_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![write_snapshot(dir.path(), "only.json", 0, 50.0)];
    let config = dir.path().join("engine.json");
    std::fs::write(&config, r#"{"config_version": 2, "trend_change": 0.0}"#).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_intake-replay"))
        .arg("aggregate")
        .args(&files)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap()
        .status;

    assert!(!status.success());
}
