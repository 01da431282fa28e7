mod common;

use common::{at, test_bank};
use intake_bank::standard_bank;
use intake_core::models::question::{Question, QuestionType, ScaleRange};
use intake_core::models::response::{Response, ResponseValue};
use intake_engine::patterns::PatternMatcher;
use intake_engine::severity::{answer_severity, in_top_tiers};

fn answer(bank: &intake_bank::QuestionBank, id: &str, value: ResponseValue) -> Response {
    Response::new(bank.question(id).unwrap(), value, at(0))
}

fn choice(value: &str) -> ResponseValue {
    ResponseValue::Choice(value.to_string())
}

#[test]
fn required_markers_at_top_tier_detect_pattern() {
    let bank = test_bank();
    let matcher = PatternMatcher::new(&bank, 0.5);
    let responses = vec![
        answer(&bank, "a1", ResponseValue::Scale(5.0)),
        answer(&bank, "a2", ResponseValue::Scale(5.0)),
    ];

    let patterns = matcher.detect(&responses);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].name, "P_A");
    assert_eq!(patterns[0].confidence, 1.0);
    assert!(patterns[0].is_active());
    assert_eq!(patterns[0].supporting_responses, vec!["a1", "a2"]);
}

#[test]
fn partial_evidence_is_not_detected() {
    let bank = test_bank();
    let matcher = PatternMatcher::new(&bank, 0.5);
    let responses = vec![answer(&bank, "a1", ResponseValue::Scale(5.0))];

    assert!(matcher.detect(&responses).is_empty());
    let evidence = matcher.evaluate(&responses);
    assert_eq!(evidence[0].satisfied, vec!["a1"]);
    assert_eq!(evidence[0].pending, vec!["a2"]);
    assert_eq!(evidence[0].confidence, 0.5);
}

#[test]
fn detection_ignores_ledger_order() {
    let bank = standard_bank();
    let matcher = PatternMatcher::new(bank, 0.5);
    let mut responses = vec![
        answer(bank, "scr_digestive", choice("daily")),
        answer(bank, "asm_bloating_meals", choice("often")),
        answer(bank, "asm_bowel_regularity", choice("alternating")),
        answer(bank, "asm_antibiotics", choice("more")),
        answer(bank, "scr_fatigue", ResponseValue::Scale(2.0)),
    ];
    let forward = matcher.detect(&responses);
    responses.reverse();
    let backward = matcher.detect(&responses);

    assert_eq!(forward, backward);
    let gut = forward.iter().find(|p| p.name == "GUT_DYSBIOSIS").unwrap();
    assert!((gut.confidence - 0.8).abs() < 1e-9);
    assert!(gut.is_active());
}

#[test]
fn sleep_pattern_uses_numeric_threshold() {
    let bank = standard_bank();
    let matcher = PatternMatcher::new(bank, 0.5);
    let responses = vec![
        answer(bank, "nrg_sleep_hours", ResponseValue::Number(5.5)),
        answer(bank, "scr_sleep", choice("daily")),
        answer(bank, "nrg_waking_night", choice("often")),
    ];

    let sleep = matcher
        .detect(&responses)
        .into_iter()
        .find(|p| p.name == "SLEEP_DEPRIVATION")
        .unwrap();
    assert!((sleep.confidence - 0.75).abs() < 1e-9);
}

#[test]
fn per_pattern_threshold_overrides_default() {
    let bank = standard_bank();
    let matcher = PatternMatcher::new(bank, 0.5);
    // SYSTEMIC_INFLAMMATION needs confidence above 0.6; 3 of 5 is not enough.
    let responses = vec![
        answer(bank, "scr_pain", ResponseValue::Scale(5.0)),
        answer(bank, "def_joint_swelling", choice("daily")),
        answer(bank, "def_allergies", choice("often")),
    ];

    let inflammation = matcher
        .detect(&responses)
        .into_iter()
        .find(|p| p.name == "SYSTEMIC_INFLAMMATION")
        .unwrap();
    assert!((inflammation.confidence - 0.6).abs() < 1e-9);
    assert!(!inflammation.is_active());
}

#[test]
fn results_are_sorted_by_confidence() {
    let bank = standard_bank();
    let matcher = PatternMatcher::new(bank, 0.5);
    let responses = vec![
        answer(bank, "scr_digestive", choice("daily")),
        answer(bank, "asm_bloating_meals", choice("often")),
        answer(bank, "asm_bowel_regularity", choice("loose")),
        answer(bank, "nrg_sleep_hours", ResponseValue::Number(4.0)),
        answer(bank, "scr_sleep", choice("often")),
    ];

    let patterns = matcher.detect(&responses);
    assert!(patterns.windows(2).all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn likert_top_tiers_follow_polarity() {
    let worse = Question::new("q", "M", "How bad?", QuestionType::LikertScale).with_scale(ScaleRange::LIKERT_5);
    assert!(in_top_tiers(&worse, &ResponseValue::Scale(5.0), 2));
    assert!(in_top_tiers(&worse, &ResponseValue::Scale(4.0), 2));
    assert!(!in_top_tiers(&worse, &ResponseValue::Scale(3.0), 2));

    let better = worse.clone().higher_is_better();
    assert!(in_top_tiers(&better, &ResponseValue::Scale(1.0), 1));
    assert!(!in_top_tiers(&better, &ResponseValue::Scale(5.0), 1));
}

#[test]
fn option_top_tiers_use_distinct_severity_levels() {
    let bank = standard_bank();
    let bowel = bank.question("asm_bowel_regularity").unwrap();
    // Levels are 3 (alternating), 2 (constipated, loose), 1, 0.
    assert!(in_top_tiers(bowel, &choice("alternating"), 1));
    assert!(!in_top_tiers(bowel, &choice("loose"), 1));
    assert!(in_top_tiers(bowel, &choice("loose"), 2));
    assert!(!in_top_tiers(bowel, &choice("variable"), 2));
}

#[test]
fn severity_is_normalized_and_inverted_for_higher_is_better() {
    let bank = standard_bank();
    let fatigue = bank.question("scr_fatigue").unwrap();
    assert_eq!(answer_severity(fatigue, &ResponseValue::Scale(1.0)), Some(0.0));
    assert_eq!(answer_severity(fatigue, &ResponseValue::Scale(5.0)), Some(1.0));

    let sleep = bank.question("nrg_sleep_hours").unwrap();
    assert_eq!(answer_severity(sleep, &ResponseValue::Number(14.0)), Some(0.0));
    assert_eq!(answer_severity(sleep, &ResponseValue::Number(0.0)), Some(1.0));

    let concerns = bank.question("scr_concerns").unwrap();
    assert_eq!(answer_severity(concerns, &ResponseValue::Text("tired".to_string())), None);
}
