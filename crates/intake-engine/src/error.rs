use thiserror::Error;
use uuid::Uuid;

use intake_core::error::CoreError;
use intake_core::models::session::SessionStatus;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid question '{question_id}': {reason}")]
    InvalidQuestion { question_id: String, reason: String },

    #[error(transparent)]
    InvalidValue(#[from] CoreError),

    /// The ledger names a question the loaded bank does not know.
    #[error("session {session_id} references question '{question_id}' which is not in the bank")]
    InconsistentSession { session_id: Uuid, question_id: String },

    #[error("analysis '{label}' excluded: {reason}")]
    PartialAnalysis { label: String, reason: String },

    #[error("cannot {action} while the session is {status:?}")]
    InvalidTransition {
        action: &'static str,
        status: SessionStatus,
    },
}

impl EngineError {
    pub(crate) fn invalid_question(question_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidQuestion {
            question_id: question_id.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("config is not a JSON object")]
    NotAnObject,

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("narrative generation failed: {0}")]
    Failed(String),
}
