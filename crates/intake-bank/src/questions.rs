//! Shorthand constructors for the compiled-in module tables.

use intake_core::models::question::{Question, QuestionOption, QuestionType, ScaleRange};

/// 1–5 severity scale.
pub(crate) fn likert(id: &str, module_id: &str, text: &str) -> Question {
    Question::new(id, module_id, text, QuestionType::LikertScale).with_scale(ScaleRange::LIKERT_5)
}

pub(crate) fn frequency(id: &str, module_id: &str, text: &str) -> Question {
    Question::new(id, module_id, text, QuestionType::Frequency).with_options(vec![
        QuestionOption::new("never", "Never").severity(0.0),
        QuestionOption::new("rarely", "Rarely (1-2 times/month)").severity(1.0),
        QuestionOption::new("sometimes", "Sometimes (weekly)").severity(2.0),
        QuestionOption::new("often", "Often (3-4 times/week)").severity(3.0),
        QuestionOption::new("daily", "Daily").severity(4.0),
    ])
}

pub(crate) fn yes_no(id: &str, module_id: &str, text: &str) -> Question {
    Question::new(id, module_id, text, QuestionType::YesNo).with_options(vec![
        QuestionOption::new("yes", "Yes").severity(1.0),
        QuestionOption::new("no", "No").severity(0.0),
    ])
}

/// Single choice; options are (value, label, severity).
pub(crate) fn choice(id: &str, module_id: &str, text: &str, options: &[(&str, &str, f64)]) -> Question {
    Question::new(id, module_id, text, QuestionType::MultipleChoice).with_options(options_from(options))
}

pub(crate) fn multi_select(
    id: &str,
    module_id: &str,
    text: &str,
    options: &[(&str, &str, f64)],
) -> Question {
    Question::new(id, module_id, text, QuestionType::MultiSelect).with_options(options_from(options))
}

pub(crate) fn number(id: &str, module_id: &str, text: &str, min: f64, max: f64) -> Question {
    Question::new(id, module_id, text, QuestionType::Number).with_scale(ScaleRange {
        min,
        max,
        step: None,
    })
}

pub(crate) fn free_text(id: &str, module_id: &str, text: &str) -> Question {
    Question::new(id, module_id, text, QuestionType::Text).weighted(0.0)
}

fn options_from(options: &[(&str, &str, f64)]) -> Vec<QuestionOption> {
    options
        .iter()
        .map(|(value, label, severity)| QuestionOption::new(value, label).severity(*severity))
        .collect()
}
