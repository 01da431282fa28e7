mod common;

use common::{at, detected, test_bank};
use intake_core::models::analysis::RiskLevel;
use intake_core::models::outcome::{CompletionReason, NextQuestionOutcome};
use intake_core::models::pattern::Urgency;
use intake_core::models::response::{Response, ResponseValue};
use intake_core::models::session::RespondentProfile;
use intake_engine::config::{EngineConfig, ModuleOverride};
use intake_engine::error::EngineError;
use intake_engine::scoring::{risk_level, Scorer};
use intake_engine::AssessmentEngine;
use uuid::Uuid;

fn answers() -> Vec<(&'static str, ResponseValue)> {
    vec![
        ("a1", ResponseValue::Scale(5.0)),
        ("a2", ResponseValue::Scale(3.0)),
        ("b2", ResponseValue::Choice("sometimes".to_string())),
        ("b3", ResponseValue::Number(5.0)),
    ]
}

fn ledger(bank: &intake_bank::QuestionBank) -> Vec<Response> {
    answers()
        .into_iter()
        .map(|(id, value)| Response::new(bank.question(id).unwrap(), value, at(0)))
        .collect()
}

#[test]
fn module_scores_are_weighted_severity_means() {
    let bank = test_bank();
    let config = EngineConfig::default();
    let scores = Scorer::new(&bank, &config).score(&ledger(&bank));

    assert!((scores.module_scores["A"] - 75.0).abs() < 1e-9);
    assert!((scores.module_scores["B"] - 50.0).abs() < 1e-9);
    // Module B has emphasis 2.
    assert!((scores.overall - 175.0 / 3.0).abs() < 1e-9);
    assert_eq!(scores.skipped, 0);
}

#[test]
fn emphasis_override_changes_overall() {
    let bank = test_bank();
    let mut config = EngineConfig::default();
    config.modules.insert(
        "B".to_string(),
        ModuleOverride {
            min_questions: None,
            emphasis: Some(1.0),
            ..ModuleOverride::default()
        },
    );
    let scores = Scorer::new(&bank, &config).score(&ledger(&bank));

    assert!((scores.overall - 62.5).abs() < 1e-9);
}

#[test]
fn unscorable_responses_are_skipped_and_counted() {
    let bank = test_bank();
    let config = EngineConfig::default();
    let mut responses = ledger(&bank);
    responses.push(Response {
        question_id: "a3".to_string(),
        value: ResponseValue::Text("not a number".to_string()),
        timestamp: at(0),
        module_id: "A".to_string(),
        is_follow_up: false,
    });
    responses.push(common::scale("unknown", 3.0));

    let scores = Scorer::new(&bank, &config).score(&responses);
    assert_eq!(scores.skipped, 2);
    assert!((scores.module_scores["A"] - 75.0).abs() < 1e-9);
}

#[test]
fn empty_ledger_scores_zero() {
    let bank = test_bank();
    let config = EngineConfig::default();
    let scores = Scorer::new(&bank, &config).score(&[]);

    assert!(scores.module_scores.is_empty());
    assert_eq!(scores.overall, 0.0);
}

#[test]
fn risk_levels() {
    assert_eq!(risk_level(10.0, &[]), RiskLevel::Low);
    assert_eq!(risk_level(30.0, &[]), RiskLevel::Moderate);
    assert_eq!(risk_level(55.0, &[]), RiskLevel::High);
    assert_eq!(risk_level(70.0, &[]), RiskLevel::Critical);

    let mut urgent = detected("URGENT", 0.9);
    urgent.urgency = Urgency::High;
    assert_eq!(risk_level(10.0, &[urgent.clone()]), RiskLevel::Critical);

    urgent.confidence = 0.3;
    assert_eq!(risk_level(10.0, &[urgent]), RiskLevel::Low);
}

#[test]
fn snapshot_requires_completed_session() {
    let bank = test_bank();
    let engine = AssessmentEngine::new(&bank, EngineConfig::default()).unwrap();
    let session = engine.start_session_at(Uuid::new_v4(), RespondentProfile::default(), at(0));

    assert!(matches!(
        engine.snapshot(&session),
        Err(EngineError::InvalidTransition { .. })
    ));
}

#[test]
fn snapshot_of_completed_session() {
    let bank = test_bank();
    let engine = AssessmentEngine::new(&bank, EngineConfig::default()).unwrap();
    let mut session = engine.start_session_at(Uuid::new_v4(), RespondentProfile::default(), at(0));
    for (id, value) in answers() {
        session = engine.record_response_at(&session, id, value, at(1)).unwrap();
    }
    let done = NextQuestionOutcome::AssessmentComplete {
        reason: CompletionReason::AllModulesTerminal,
    };
    let session = engine.apply_at(&session, &done, at(60)).unwrap();

    let snapshot = engine.snapshot(&session).unwrap();
    assert_eq!(snapshot.session_id, session.id);
    assert_eq!(snapshot.completed_at, at(60));
    assert_eq!(snapshot.questions_asked, 4);
    assert_eq!(snapshot.risk_level, RiskLevel::High);
    assert!(snapshot.patterns.is_empty());
    assert_eq!(snapshot.under_reporting_risk, 0.2);
}
