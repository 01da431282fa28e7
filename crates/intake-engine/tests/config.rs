use intake_engine::config::{load_config, parse_config, save_config, EngineConfig, ModuleOverride, CURRENT_VERSION};
use intake_engine::error::ConfigError;

#[test]
fn defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.max_questions, 250);
    assert_eq!(config.activation_threshold, 0.5);
    assert_eq!(config.validation_risk_threshold, 0.7);
    assert_eq!(config.under_reporting.mild_fraction, 0.7);
    assert_eq!(config.under_reporting.high_risk, 0.8);
    assert_eq!(config.under_reporting.baseline_risk, 0.2);
    assert_eq!(config.seconds_per_question, 15);
    assert_eq!(config.module_question_cap, 20);
    assert!(config.validate().is_ok());
}

#[test]
fn missing_fields_take_defaults() {
    let config = parse_config(r#"{ "config_version": 1, "max_questions": 120 }"#).unwrap();
    assert_eq!(config.max_questions, 120);
    assert_eq!(config.trend_change, 0.10);
}

#[test]
fn pre_versioned_config_is_migrated() {
    let config = parse_config(r#"{ "target_max_questions": 180 }"#).unwrap();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.max_questions, 180);
    assert_eq!(config.module_question_cap, 20);
}

#[test]
fn newer_config_version_is_rejected() {
    let err = parse_config(r#"{ "config_version": 99 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedVersion { found: 99, .. }));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(matches!(parse_config("[1, 2]").unwrap_err(), ConfigError::NotAnObject));
}

#[test]
fn out_of_range_values_are_rejected() {
    let err = parse_config(r#"{ "config_version": 1, "activation_threshold": 1.5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "activation_threshold"));

    let err = parse_config(r#"{ "config_version": 1, "max_questions": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = parse_config(r#"{ "config_version": 1, "modules": { "ENERGY": { "emphasis": 0 } } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "modules.ENERGY.emphasis"));
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.json");

    let mut config = EngineConfig {
        config_version: 0,
        max_questions: 90,
        ..EngineConfig::default()
    };
    config.modules.insert(
        "SCREENING".to_string(),
        ModuleOverride {
            min_questions: Some(4),
            max_questions: Some(8),
            emphasis: None,
        },
    );
    save_config(&config, &path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.max_questions, 90);
    assert_eq!(loaded.modules["SCREENING"].min_questions, Some(4));
    assert_eq!(loaded.modules["SCREENING"].max_questions, Some(8));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn question_cap_prefers_override_then_module_then_default() {
    let mut module = intake_bank::standard_bank().module("ENERGY").unwrap().clone();
    let mut config = EngineConfig::default();
    assert_eq!(config.question_cap(&module), 20);

    module.max_questions = Some(12);
    assert_eq!(config.question_cap(&module), 12);

    config.modules.insert(
        "ENERGY".to_string(),
        ModuleOverride {
            max_questions: Some(5),
            ..ModuleOverride::default()
        },
    );
    assert_eq!(config.question_cap(&module), 5);
}

#[test]
fn zero_question_caps_are_rejected() {
    let err = parse_config(r#"{ "config_version": 2, "module_question_cap": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "module_question_cap"));

    let err = parse_config(r#"{ "config_version": 2, "modules": { "ENERGY": { "max_questions": 0 } } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "modules.ENERGY.max_questions"));
}
