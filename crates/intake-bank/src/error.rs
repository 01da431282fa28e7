use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("bank definition could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate module id: {0}")]
    DuplicateModule(String),

    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("duplicate pattern name: {0}")]
    DuplicatePattern(String),

    #[error("question '{question_id}' declares module '{declared}' but is listed under '{listed}'")]
    ModuleMismatch {
        question_id: String,
        declared: String,
        listed: String,
    },

    #[error("'{referenced_by}' references unknown question '{question_id}'")]
    UnknownQuestion {
        referenced_by: String,
        question_id: String,
    },

    #[error("'{referenced_by}' references unknown module '{module_id}'")]
    UnknownModule {
        referenced_by: String,
        module_id: String,
    },

    #[error("question '{question_id}' references unknown pattern '{pattern}'")]
    UnknownPattern { question_id: String, pattern: String },

    #[error("invalid question '{question_id}': {reason}")]
    InvalidQuestion { question_id: String, reason: String },

    #[error("invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("invalid module '{module_id}': {reason}")]
    InvalidModule { module_id: String, reason: String },
}
