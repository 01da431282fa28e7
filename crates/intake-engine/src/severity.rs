//! Severity of individual answers, shared by pattern markers and scoring.

use intake_core::models::question::{Polarity, Question, QuestionType};
use intake_core::models::response::ResponseValue;

/// Severity of one answer in [0, 1], where 1 is the worst answer the
/// question allows. `None` when the answer carries no severity: free text,
/// numbers without bounds, or a value that does not fit the question.
pub fn answer_severity(question: &Question, value: &ResponseValue) -> Option<f64> {
    question.validate(value).ok()?;
    match value {
        ResponseValue::Scale(v) | ResponseValue::Number(v) => {
            let range = question.scale_range()?;
            Some(oriented(question.polarity, range.normalize(*v)))
        }
        ResponseValue::Choice(choice) => {
            let weights = option_weights(question);
            let max = weights.iter().map(|(_, w)| *w).fold(0.0, f64::max);
            let weight = weights.iter().find(|(v, _)| v == choice).map(|(_, w)| *w)?;
            Some(if max > 0.0 { weight / max } else { 0.0 })
        }
        ResponseValue::Choices(choices) => {
            let weights = option_weights(question);
            let total: f64 = weights.iter().map(|(_, w)| w.max(0.0)).sum();
            if total <= 0.0 {
                return Some(0.0);
            }
            let selected: f64 = weights
                .iter()
                .filter(|(v, _)| choices.iter().any(|c| c == v))
                .map(|(_, w)| w.max(0.0))
                .sum();
            Some(selected / total)
        }
        ResponseValue::Text(_) => None,
    }
}

/// True when the answer sits in the `tiers` most severe levels the
/// question offers. Multi-select answers qualify if any selected option
/// does. Numbers without a step have no tiers.
pub fn in_top_tiers(question: &Question, value: &ResponseValue, tiers: u8) -> bool {
    if tiers == 0 || question.validate(value).is_err() {
        return false;
    }
    match value {
        ResponseValue::Scale(v) | ResponseValue::Number(v) => {
            let Some(range) = question.scale_range() else {
                return false;
            };
            let Some(step) = range.step.filter(|s| *s > 0.0) else {
                return false;
            };
            let distance = match question.polarity {
                Polarity::HigherIsWorse => range.max - v,
                Polarity::HigherIsBetter => v - range.min,
            };
            (distance / step).round() < f64::from(tiers)
        }
        ResponseValue::Choice(choice) => option_in_top_tiers(question, choice, tiers),
        ResponseValue::Choices(choices) => choices
            .iter()
            .any(|c| option_in_top_tiers(question, c, tiers)),
        ResponseValue::Text(_) => false,
    }
}

fn option_in_top_tiers(question: &Question, choice: &str, tiers: u8) -> bool {
    let weights = option_weights(question);
    let Some(weight) = weights.iter().find(|(v, _)| v == choice).map(|(_, w)| *w) else {
        return false;
    };
    let mut levels: Vec<f64> = weights.iter().map(|(_, w)| *w).collect();
    levels.sort_by(|a, b| b.total_cmp(a));
    levels.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    levels
        .iter()
        .take(usize::from(tiers))
        .any(|level| (level - weight).abs() < 1e-9)
}

/// Severity weight per option value. Options without an explicit weight
/// are ranked by position, later options being more severe unless the
/// question is higher-is-better.
fn option_weights(question: &Question) -> Vec<(String, f64)> {
    if question.options.is_empty() && question.question_type == QuestionType::YesNo {
        return vec![("yes".to_string(), 1.0), ("no".to_string(), 0.0)];
    }
    let last = question.options.len().saturating_sub(1);
    question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let rank = match question.polarity {
                Polarity::HigherIsWorse => i,
                Polarity::HigherIsBetter => last - i,
            };
            (option.value.clone(), option.severity.unwrap_or(rank as f64))
        })
        .collect()
}

fn oriented(polarity: Polarity, position: f64) -> f64 {
    match polarity {
        Polarity::HigherIsWorse => position,
        Polarity::HigherIsBetter => 1.0 - position,
    }
}
