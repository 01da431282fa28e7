#![allow(dead_code)]

use intake_bank::catalog::{MarkerCondition, MarkerRule, ModuleDefinition, PatternDefinition};
use intake_bank::{BankDefinition, QuestionBank};
use intake_core::models::pattern::{DetectedPattern, PatternCategory, Urgency};
use intake_core::models::question::{Question, QuestionOption, QuestionType, ScaleRange};
use intake_core::models::response::{Response, ResponseValue};
use jiff::Timestamp;

pub fn likert(id: &str, module_id: &str) -> Question {
    Question::new(id, module_id, "How severe?", QuestionType::LikertScale).with_scale(ScaleRange::LIKERT_5)
}

pub fn yes_no(id: &str, module_id: &str) -> Question {
    Question::new(id, module_id, "Does it happen?", QuestionType::YesNo).with_options(vec![
        QuestionOption::new("yes", "Yes").severity(1.0),
        QuestionOption::new("no", "No").severity(0.0),
    ])
}

pub fn module(id: &str, min_questions: usize, emphasis: f64, questions: Vec<Question>) -> ModuleDefinition {
    ModuleDefinition {
        id: id.to_string(),
        name: format!("Module {id}"),
        min_questions,
        max_questions: None,
        emphasis,
        questions,
        description: None,
    }
}

/// Two modules. Module A has a pattern whose required markers are a1 and
/// a2 at the top tier, with one follow-up living in A.
pub fn test_bank() -> QuestionBank {
    let a = module(
        "A",
        2,
        1.0,
        vec![
            likert("a1", "A"),
            likert("a2", "A"),
            likert("a3", "A"),
            yes_no("a4", "A"),
            yes_no("a_fu", "A").follow_up().confirms(&["P_A"]),
        ],
    );
    let b = module(
        "B",
        2,
        2.0,
        vec![
            likert("b1", "B"),
            Question::new("b2", "B", "How often?", QuestionType::Frequency).with_options(vec![
                QuestionOption::new("never", "Never").severity(0.0),
                QuestionOption::new("sometimes", "Sometimes").severity(2.0),
                QuestionOption::new("daily", "Daily").severity(4.0),
            ]),
            Question::new("b3", "B", "Hours of sleep?", QuestionType::Number)
                .with_scale(ScaleRange {
                    min: 0.0,
                    max: 10.0,
                    step: None,
                })
                .higher_is_better(),
        ],
    );
    let pattern = PatternDefinition {
        name: "P_A".to_string(),
        display_name: "Pattern A".to_string(),
        category: PatternCategory::Inflammatory,
        urgency: Urgency::Medium,
        required: vec![
            MarkerCondition::new("a1", MarkerRule::TopTiers(1)),
            MarkerCondition::new("a2", MarkerRule::TopTiers(1)),
        ],
        supporting: Vec::new(),
        min_required: 2,
        activation_threshold: None,
        follow_ups: vec!["a_fu".to_string()],
        related_modules: Vec::new(),
    };
    QuestionBank::new(BankDefinition {
        version: "test".to_string(),
        modules: vec![a, b],
        patterns: vec![pattern],
    })
    .expect("test bank is valid")
}

pub fn at(offset_seconds: i64) -> Timestamp {
    Timestamp::from_second(1_700_000_000 + offset_seconds).unwrap()
}

pub fn scale(question_id: &str, value: f64) -> Response {
    Response {
        question_id: question_id.to_string(),
        value: ResponseValue::Scale(value),
        timestamp: at(0),
        module_id: "A".to_string(),
        is_follow_up: false,
    }
}

pub fn detected(name: &str, confidence: f64) -> DetectedPattern {
    DetectedPattern {
        name: name.to_string(),
        display_name: name.to_string(),
        confidence,
        supporting_responses: Vec::new(),
        category: PatternCategory::Metabolic,
        urgency: Urgency::Low,
        follow_ups: vec![format!("{name}_fu1"), format!("{name}_fu2"), format!("{name}_fu3")],
        activation_threshold: 0.5,
    }
}
