use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid value for question '{question_id}': {reason}")]
    InvalidValue { question_id: String, reason: String },
}

impl CoreError {
    pub(crate) fn invalid(question_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            question_id: question_id.to_string(),
            reason: reason.into(),
        }
    }
}
