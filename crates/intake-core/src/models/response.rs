use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::question::{Question, QuestionType};
use crate::error::CoreError;

/// The answer given to a single question. Which variant is valid depends on
/// the question's type; see [`Question::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum ResponseValue {
    Scale(f64),
    Choice(String),
    Choices(Vec<String>),
    Text(String),
    Number(f64),
}

impl ResponseValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseValue::Scale(_) => "scale",
            ResponseValue::Choice(_) => "choice",
            ResponseValue::Choices(_) => "choices",
            ResponseValue::Text(_) => "text",
            ResponseValue::Number(_) => "number",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ResponseValue::Scale(v) | ResponseValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// True when the answer is, or includes, the option `value`.
    pub fn selects(&self, value: &str) -> bool {
        match self {
            ResponseValue::Choice(choice) => choice == value,
            ResponseValue::Choices(choices) => choices.iter().any(|c| c == value),
            ResponseValue::Text(text) => text == value,
            ResponseValue::Scale(_) | ResponseValue::Number(_) => false,
        }
    }

    /// Interpret a raw JSON answer (as submitted by the web layer) for
    /// `question`. The result still needs [`Question::validate`].
    pub fn from_raw(question: &Question, raw: &serde_json::Value) -> Result<Self, CoreError> {
        use serde_json::Value;

        let mismatch = || {
            CoreError::invalid(
                &question.id,
                format!("cannot read {raw} as a {:?} answer", question.question_type),
            )
        };

        match question.question_type {
            QuestionType::LikertScale => raw.as_f64().map(ResponseValue::Scale).ok_or_else(mismatch),
            QuestionType::Number => match raw {
                Value::Number(n) => n.as_f64().map(ResponseValue::Number).ok_or_else(mismatch),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(ResponseValue::Number)
                    .map_err(|_| mismatch()),
                _ => Err(mismatch()),
            },
            QuestionType::MultipleChoice | QuestionType::Frequency => match raw {
                Value::String(s) => Ok(ResponseValue::Choice(s.clone())),
                Value::Number(n) => Ok(ResponseValue::Choice(n.to_string())),
                _ => Err(mismatch()),
            },
            QuestionType::YesNo => match raw {
                Value::Bool(true) => Ok(ResponseValue::Choice("yes".to_string())),
                Value::Bool(false) => Ok(ResponseValue::Choice("no".to_string())),
                Value::String(s) => Ok(ResponseValue::Choice(s.to_lowercase())),
                _ => Err(mismatch()),
            },
            QuestionType::MultiSelect => match raw {
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        Value::Number(n) => Ok(n.to_string()),
                        _ => Err(mismatch()),
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(ResponseValue::Choices),
                Value::String(s) => Ok(ResponseValue::Choices(vec![s.clone()])),
                _ => Err(mismatch()),
            },
            QuestionType::Text => match raw {
                Value::String(s) => Ok(ResponseValue::Text(s.clone())),
                _ => Err(mismatch()),
            },
        }
    }
}

/// One entry in a session's append-only response ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub question_id: String,
    pub value: ResponseValue,
    pub timestamp: jiff::Timestamp,
    /// Copied from the question when the answer is recorded.
    pub module_id: String,
    pub is_follow_up: bool,
}

impl Response {
    pub fn new(question: &Question, value: ResponseValue, timestamp: jiff::Timestamp) -> Self {
        Self {
            question_id: question.id.clone(),
            value,
            timestamp,
            module_id: question.module_id.clone(),
            is_follow_up: question.is_follow_up,
        }
    }
}
