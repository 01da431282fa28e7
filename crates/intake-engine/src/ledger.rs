//! Read-side view of a session's response ledger.

use std::collections::{HashMap, HashSet};

use intake_bank::QuestionBank;
use intake_core::models::question::Question;
use intake_core::models::response::Response;
use intake_core::models::session::Session;

use crate::error::EngineError;

/// Index over an append-only ledger: answers by question id plus the
/// questions that earlier answers have ruled out.
#[derive(Debug)]
pub struct LedgerView<'a> {
    responses: &'a [Response],
    by_question: HashMap<&'a str, &'a Response>,
    skipped: HashSet<&'a str>,
}

impl<'a> LedgerView<'a> {
    pub fn new(bank: &'a QuestionBank, responses: &'a [Response]) -> Self {
        let mut by_question = HashMap::with_capacity(responses.len());
        let mut skipped = HashSet::new();
        for response in responses {
            by_question.insert(response.question_id.as_str(), response);
            let Some(question) = bank.question(&response.question_id) else {
                continue;
            };
            for option in &question.options {
                if response.value.selects(&option.value) {
                    skipped.extend(option.skips.iter().map(String::as_str));
                }
            }
        }
        Self {
            responses,
            by_question,
            skipped,
        }
    }

    pub fn responses(&self) -> &'a [Response] {
        self.responses
    }

    pub fn answer(&self, question_id: &str) -> Option<&'a Response> {
        self.by_question.get(question_id).copied()
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.by_question.contains_key(question_id)
    }

    /// True when an earlier option choice made this question inapplicable.
    pub fn is_skipped(&self, question_id: &str) -> bool {
        self.skipped.contains(question_id)
    }

    /// Whether `question`'s precondition, if any, holds. An unanswered
    /// precondition question counts as unmet.
    pub fn precondition_met(&self, question: &Question) -> bool {
        match &question.precondition {
            None => true,
            Some(pre) => self
                .answer(&pre.question_id)
                .is_some_and(|r| pre.condition.matches(&r.value)),
        }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Fail if the ledger references a question the bank does not contain.
pub fn check_consistency(bank: &QuestionBank, session: &Session) -> Result<(), EngineError> {
    match session
        .responses
        .iter()
        .find(|r| bank.question(&r.question_id).is_none())
    {
        Some(response) => Err(EngineError::InconsistentSession {
            session_id: session.id,
            question_id: response.question_id.clone(),
        }),
        None => Ok(()),
    }
}
