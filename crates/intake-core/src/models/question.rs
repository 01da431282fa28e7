use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::response::ResponseValue;
use crate::error::CoreError;

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum QuestionType {
    LikertScale,
    MultipleChoice,
    YesNo,
    MultiSelect,
    Text,
    Number,
    Frequency,
}

/// Direction of a question's raw value relative to symptom severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Polarity {
    /// e.g. "How often do you get headaches?"
    #[default]
    HigherIsWorse,
    /// e.g. "How good is your circulation?"
    HigherIsBetter,
}

/// Inclusive bounds for scale and numeric answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScaleRange {
    pub const LIKERT_5: ScaleRange = ScaleRange {
        min: 1.0,
        max: 5.0,
        step: Some(1.0),
    };

    pub const LIKERT_10: ScaleRange = ScaleRange {
        min: 1.0,
        max: 10.0,
        step: Some(1.0),
    };

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }

    /// Position of `value` inside the range: 0.0 at `min`, 1.0 at `max`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
    /// Severity weight used by scoring and severity-tier markers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<f64>,
    /// Questions that become inapplicable once this option is chosen.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skips: Vec<String>,
}

impl QuestionOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            severity: None,
            skips: Vec::new(),
        }
    }

    pub fn severity(mut self, severity: f64) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn skipping(mut self, question_ids: &[&str]) -> Self {
        self.skips = question_ids.iter().map(|id| id.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Female,
    Male,
}

/// A comparison against a recorded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum Condition {
    Equals(String),
    NotEquals(String),
    AtLeast(f64),
    AtMost(f64),
    AnyOf(Vec<String>),
}

impl Condition {
    pub fn matches(&self, value: &ResponseValue) -> bool {
        match self {
            Condition::Equals(expected) => value.selects(expected),
            Condition::NotEquals(expected) => !value.selects(expected),
            Condition::AtLeast(threshold) => value.as_number().is_some_and(|v| v >= *threshold),
            Condition::AtMost(threshold) => value.as_number().is_some_and(|v| v <= *threshold),
            Condition::AnyOf(expected) => expected.iter().any(|e| value.selects(e)),
        }
    }
}

/// Only ask a question once an earlier answer meets `condition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Precondition {
    pub question_id: String,
    pub condition: Condition,
}

/// An answer meeting `condition` raises the priority of `module_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModuleTrigger {
    pub condition: Condition,
    pub module_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub module_id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub scale: Option<ScaleRange>,
    #[serde(default)]
    pub is_follow_up: bool,
    /// Patterns this question helps confirm. A base question listing
    /// trigger patterns is only asked while one of them is active.
    #[serde(default)]
    pub trigger_patterns: Vec<String>,
    #[serde(default)]
    pub polarity: Polarity,
    #[serde(default = "default_weight")]
    pub scoring_weight: f64,
    #[serde(default)]
    pub applies_to: Option<Sex>,
    #[serde(default)]
    pub precondition: Option<Precondition>,
    #[serde(default)]
    pub module_triggers: Vec<ModuleTrigger>,
    /// Any answer above the mildest keeps the module open and promotes it.
    #[serde(default)]
    pub red_flag: bool,
}

fn default_weight() -> f64 {
    1.0
}

impl Question {
    pub fn new(id: &str, module_id: &str, text: &str, question_type: QuestionType) -> Self {
        Self {
            id: id.to_string(),
            module_id: module_id.to_string(),
            text: text.to_string(),
            question_type,
            options: Vec::new(),
            scale: None,
            is_follow_up: false,
            trigger_patterns: Vec::new(),
            polarity: Polarity::HigherIsWorse,
            scoring_weight: default_weight(),
            applies_to: None,
            precondition: None,
            module_triggers: Vec::new(),
            red_flag: false,
        }
    }

    pub fn with_options(mut self, options: Vec<QuestionOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_scale(mut self, scale: ScaleRange) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn weighted(mut self, weight: f64) -> Self {
        self.scoring_weight = weight;
        self
    }

    pub fn higher_is_better(mut self) -> Self {
        self.polarity = Polarity::HigherIsBetter;
        self
    }

    pub fn follow_up(mut self) -> Self {
        self.is_follow_up = true;
        self
    }

    pub fn confirms(mut self, patterns: &[&str]) -> Self {
        self.trigger_patterns = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn only_for(mut self, sex: Sex) -> Self {
        self.applies_to = Some(sex);
        self
    }

    pub fn requires(mut self, question_id: &str, condition: Condition) -> Self {
        self.precondition = Some(Precondition {
            question_id: question_id.to_string(),
            condition,
        });
        self
    }

    pub fn elevates(mut self, module_id: &str, condition: Condition) -> Self {
        self.module_triggers.push(ModuleTrigger {
            condition,
            module_id: module_id.to_string(),
        });
        self
    }

    pub fn red_flag(mut self) -> Self {
        self.red_flag = true;
        self
    }

    /// Choosing `option` makes `question_ids` inapplicable.
    pub fn with_skip(mut self, option: &str, question_ids: &[&str]) -> Self {
        if let Some(o) = self.options.iter_mut().find(|o| o.value == option) {
            o.skips = question_ids.iter().map(|id| id.to_string()).collect();
        }
        self
    }

    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Effective bounds for scale answers. Likert items without explicit
    /// bounds use the 1–10 scale.
    pub fn scale_range(&self) -> Option<ScaleRange> {
        match (self.question_type, self.scale) {
            (_, Some(scale)) => Some(scale),
            (QuestionType::LikertScale, None) => Some(ScaleRange::LIKERT_10),
            _ => None,
        }
    }

    fn accepts_option(&self, value: &str) -> bool {
        if self.options.is_empty() && self.question_type == QuestionType::YesNo {
            return value == "yes" || value == "no";
        }
        self.option(value).is_some()
    }

    /// Check that `value` conforms to this question's type and options.
    pub fn validate(&self, value: &ResponseValue) -> Result<(), CoreError> {
        match (self.question_type, value) {
            (QuestionType::LikertScale, ResponseValue::Scale(v)) => {
                let range = self.scale_range().unwrap_or(ScaleRange::LIKERT_10);
                if range.contains(*v) {
                    Ok(())
                } else {
                    Err(CoreError::invalid(
                        &self.id,
                        format!("scale value {v} is outside [{}, {}]", range.min, range.max),
                    ))
                }
            }
            (QuestionType::Number, ResponseValue::Number(v)) => {
                if !v.is_finite() {
                    return Err(CoreError::invalid(&self.id, "number must be finite"));
                }
                match self.scale {
                    Some(range) if *v < range.min || *v > range.max => Err(CoreError::invalid(
                        &self.id,
                        format!("number {v} is outside [{}, {}]", range.min, range.max),
                    )),
                    _ => Ok(()),
                }
            }
            (
                QuestionType::MultipleChoice | QuestionType::YesNo | QuestionType::Frequency,
                ResponseValue::Choice(choice),
            ) => {
                if self.accepts_option(choice) {
                    Ok(())
                } else {
                    Err(CoreError::invalid(&self.id, format!("'{choice}' is not an option")))
                }
            }
            (QuestionType::MultiSelect, ResponseValue::Choices(choices)) => {
                if choices.is_empty() {
                    return Err(CoreError::invalid(&self.id, "at least one option must be selected"));
                }
                for (i, choice) in choices.iter().enumerate() {
                    if !self.accepts_option(choice) {
                        return Err(CoreError::invalid(&self.id, format!("'{choice}' is not an option")));
                    }
                    if choices[..i].contains(choice) {
                        return Err(CoreError::invalid(&self.id, format!("'{choice}' selected twice")));
                    }
                }
                Ok(())
            }
            (QuestionType::Text, ResponseValue::Text(text)) => {
                if text.trim().is_empty() {
                    Err(CoreError::invalid(&self.id, "text answer is empty"))
                } else {
                    Ok(())
                }
            }
            (expected, found) => Err(CoreError::invalid(
                &self.id,
                format!("{} answer given to a {expected:?} question", found.kind()),
            )),
        }
    }
}
