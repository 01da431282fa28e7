use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::question::Question;
use super::session::ModuleStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CompletionReason {
    AllModulesTerminal,
    QuestionCap,
}

/// What the selector wants to happen next. Hand it back to the engine's
/// `apply` to move the session along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum NextQuestionOutcome {
    Question {
        question: Question,
        /// Human-readable explanation, for logs only.
        reasoning: String,
    },
    ModuleComplete {
        module_id: String,
        status: ModuleStatus,
        questions_saved: usize,
        next_module: Option<String>,
    },
    ValidationRequired {
        risk: f64,
        /// Probe questions for weakly supported patterns.
        suggested_questions: Vec<String>,
    },
    AssessmentComplete {
        reason: CompletionReason,
    },
}

impl NextQuestionOutcome {
    pub fn question(&self) -> Option<&Question> {
        match self {
            NextQuestionOutcome::Question { question, .. } => Some(question),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NextQuestionOutcome::AssessmentComplete { .. })
    }
}
