use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::question::Sex;
use super::response::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    InProgress,
    AwaitingValidation,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ModuleStatus {
    NotStarted,
    InProgress,
    /// Closed early: minimum reached and nothing left to resolve.
    Sufficient,
    /// Closed because no applicable question remained.
    Complete,
}

impl ModuleStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ModuleStatus::Sufficient | ModuleStatus::Complete)
    }
}

/// What the respondent chose at the under-reporting interstitial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationChoice {
    Continue,
    ReviewResponses,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RespondentProfile {
    #[serde(default)]
    pub sex: Option<Sex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModuleState {
    pub module_id: String,
    pub questions_asked: usize,
    pub estimated_total: usize,
    pub status: ModuleStatus,
    /// Names of active patterns with markers in this module.
    #[serde(default)]
    pub active_patterns: Vec<String>,
    /// Set when the module closes: full question count minus questions asked.
    #[serde(default)]
    pub questions_saved: usize,
}

impl ModuleState {
    pub fn new(module_id: &str, estimated_total: usize) -> Self {
        Self {
            module_id: module_id.to_string(),
            questions_asked: 0,
            estimated_total,
            status: ModuleStatus::NotStarted,
            active_patterns: Vec::new(),
            questions_saved: 0,
        }
    }
}

/// A single assessment run. Engine calls take a session by reference and
/// hand back an updated copy; nothing else holds assessment state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub id: Uuid,
    pub client_id: Uuid,
    pub responses: Vec<Response>,
    pub current_module: Option<String>,
    pub modules_visited: Vec<String>,
    pub modules: BTreeMap<String, ModuleState>,
    pub status: SessionStatus,
    #[serde(default)]
    pub validation_shown: bool,
    #[serde(default)]
    pub validation_choice: Option<ValidationChoice>,
    /// Set when the ledger no longer matches the loaded bank.
    #[serde(default)]
    pub needs_review: bool,
    #[serde(default)]
    pub respondent: RespondentProfile,
    pub created_at: jiff::Timestamp,
    pub completed_at: Option<jiff::Timestamp>,
}

impl Session {
    pub fn new(client_id: Uuid, respondent: RespondentProfile, created_at: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            responses: Vec::new(),
            current_module: None,
            modules_visited: Vec::new(),
            modules: BTreeMap::new(),
            status: SessionStatus::InProgress,
            validation_shown: false,
            validation_choice: None,
            needs_review: false,
            respondent,
            created_at,
            completed_at: None,
        }
    }

    pub fn has_answered(&self, question_id: &str) -> bool {
        self.responses.iter().any(|r| r.question_id == question_id)
    }

    pub fn questions_asked(&self) -> usize {
        self.responses.len()
    }

    pub fn module_status(&self, module_id: &str) -> ModuleStatus {
        self.modules
            .get(module_id)
            .map(|m| m.status)
            .unwrap_or(ModuleStatus::NotStarted)
    }

    pub fn questions_saved(&self) -> usize {
        self.modules
            .values()
            .filter(|m| m.status.is_terminal())
            .map(|m| m.questions_saved)
            .sum()
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}
