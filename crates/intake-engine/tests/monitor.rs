mod common;

use common::{detected, scale};
use intake_engine::config::UnderReportingConfig;
use intake_engine::monitor::{mild_fraction, suggest_validation_questions, UnderReportingMonitor};

fn monitor() -> UnderReportingMonitor {
    UnderReportingMonitor::new(UnderReportingConfig::default())
}

#[test]
fn seven_mild_of_ten_with_active_pattern_is_high_risk() {
    let mut responses: Vec<_> = (0..7).map(|i| scale(&format!("q{i}"), 1.0)).collect();
    responses.extend((7..10).map(|i| scale(&format!("q{i}"), 4.0)));
    let patterns = vec![detected("P", 0.8)];

    assert_eq!(monitor().risk(&responses, &patterns), 0.8);
}

#[test]
fn all_mild_without_active_pattern_is_baseline() {
    let responses: Vec<_> = (0..10).map(|i| scale(&format!("q{i}"), 1.0)).collect();

    assert_eq!(monitor().risk(&responses, &[]), 0.2);
}

#[test]
fn inactive_patterns_do_not_raise_risk() {
    let responses: Vec<_> = (0..10).map(|i| scale(&format!("q{i}"), 1.0)).collect();
    let patterns = vec![detected("P", 0.4)];

    assert_eq!(monitor().risk(&responses, &patterns), 0.2);
}

#[test]
fn six_mild_of_ten_is_baseline() {
    let mut responses: Vec<_> = (0..6).map(|i| scale(&format!("q{i}"), 1.0)).collect();
    responses.extend((6..10).map(|i| scale(&format!("q{i}"), 3.0)));

    assert_eq!(monitor().risk(&responses, &[detected("P", 0.9)]), 0.2);
}

#[test]
fn empty_ledger_is_baseline() {
    assert_eq!(monitor().risk(&[], &[detected("P", 0.9)]), 0.2);
    assert_eq!(mild_fraction(&[]), None);
}

#[test]
fn suggestions_come_from_weak_patterns_only() {
    let patterns = vec![detected("STRONG", 0.9), detected("WEAK", 0.6)];

    assert_eq!(
        suggest_validation_questions(&patterns),
        vec!["WEAK_fu1".to_string(), "WEAK_fu2".to_string()]
    );
}

#[test]
fn suggestions_are_deduplicated() {
    let mut a = detected("A", 0.55);
    let mut b = detected("B", 0.6);
    a.follow_ups = vec!["shared".to_string(), "a_only".to_string()];
    b.follow_ups = vec!["shared".to_string(), "b_only".to_string()];

    assert_eq!(
        suggest_validation_questions(&[a, b]),
        vec!["shared".to_string(), "a_only".to_string(), "b_only".to_string()]
    );
}
