use std::collections::BTreeMap;

use intake_bank::{standard_bank, QuestionBank};
use intake_core::models::outcome::NextQuestionOutcome;
use intake_core::models::question::{QuestionType, Sex};
use intake_core::models::response::ResponseValue;
use intake_core::models::session::{RespondentProfile, Session, ValidationChoice};
use intake_engine::patterns::PatternMatcher;
use intake_engine::AssessmentEngine;
use proptest::prelude::*;
use uuid::Uuid;

fn answer_for(bank: &QuestionBank, question_id: &str, pick: usize) -> ResponseValue {
    let question = bank.question(question_id).unwrap();
    match question.question_type {
        QuestionType::LikertScale => ResponseValue::Scale(1.0 + (pick % 5) as f64),
        QuestionType::Number => {
            let scale = question.scale.unwrap();
            ResponseValue::Number(scale.min + (scale.max - scale.min) * (pick % 11) as f64 / 10.0)
        }
        QuestionType::Text => ResponseValue::Text(format!("answer {pick}")),
        QuestionType::MultiSelect => {
            let n = question.options.len();
            ResponseValue::Choices(vec![question.options[pick % n].value.clone()])
        }
        _ => {
            let n = question.options.len();
            ResponseValue::Choice(question.options[pick % n].value.clone())
        }
    }
}

/// Run a session to completion, handing every intermediate session to `check`.
fn run(picks: &[usize], sex: Option<Sex>, mut check: impl FnMut(&Session, &Session)) -> Session {
    let engine = AssessmentEngine::standard();
    let bank = engine.bank();
    let mut session = engine.start_session(Uuid::new_v4(), RespondentProfile { sex });

    for (step, pick) in picks.iter().cycle().enumerate() {
        if step > 400 {
            break;
        }
        let outcome = engine.select_next(&session).unwrap();
        let mut next = engine.apply(&session, &outcome).unwrap();
        match &outcome {
            NextQuestionOutcome::Question { question, .. } => {
                next = engine
                    .record_response(&next, &question.id, answer_for(bank, &question.id, *pick))
                    .unwrap();
            }
            NextQuestionOutcome::ValidationRequired { .. } => {
                next = engine
                    .acknowledge_validation(&next, ValidationChoice::Continue)
                    .unwrap();
            }
            _ => {}
        }
        check(&session, &next);
        session = next;
        if outcome.is_terminal() {
            break;
        }
    }
    session
}

fn asked_per_module(session: &Session) -> BTreeMap<String, usize> {
    session
        .modules
        .iter()
        .map(|(id, m)| (id.clone(), m.questions_asked))
        .collect()
}

proptest! {
    #[test]
    fn ledger_never_repeats_a_question(picks in prop::collection::vec(0usize..20, 1..40)) {
        let session = run(&picks, Some(Sex::Female), |_, _| {});
        let mut ids: Vec<&str> = session.responses.iter().map(|r| r.question_id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
        prop_assert!(session.is_completed());
    }

    #[test]
    fn questions_asked_never_decreases(picks in prop::collection::vec(0usize..20, 1..40)) {
        let mut violations = Vec::new();
        run(&picks, None, |before, after| {
            let old = asked_per_module(before);
            let new = asked_per_module(after);
            for (module, count) in &old {
                if new.get(module).copied().unwrap_or(0) < *count {
                    violations.push(module.clone());
                }
            }
        });
        prop_assert!(violations.is_empty(), "decreased in {:?}", violations);
    }

    #[test]
    fn confidence_is_monotonic_under_appends(picks in prop::collection::vec(0usize..20, 1..40)) {
        let session = run(&picks, Some(Sex::Male), |_, _| {});
        let matcher = PatternMatcher::new(standard_bank(), 0.5);
        let mut previous: Vec<f64> = matcher.evaluate(&[]).iter().map(|e| e.confidence).collect();
        for end in 1..=session.responses.len() {
            let current: Vec<f64> = matcher
                .evaluate(&session.responses[..end])
                .iter()
                .map(|e| e.confidence)
                .collect();
            for (before, after) in previous.iter().zip(&current) {
                prop_assert!(after >= before);
            }
            previous = current;
        }
    }
}
