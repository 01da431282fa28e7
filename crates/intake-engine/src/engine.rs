use jiff::Timestamp;
use uuid::Uuid;

use intake_bank::{standard_bank, QuestionBank};
use intake_core::models::analysis::{AnalysisSnapshot, CrossReportAggregate};
use intake_core::models::outcome::NextQuestionOutcome;
use intake_core::models::pattern::DetectedPattern;
use intake_core::models::response::{Response, ResponseValue};
use intake_core::models::session::{
    ModuleState, ModuleStatus, RespondentProfile, Session, SessionStatus, ValidationChoice,
};

use crate::aggregate;
use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError};
use crate::ledger::check_consistency;
use crate::monitor::UnderReportingMonitor;
use crate::scoring::{risk_level, Scorer};
use crate::selector::QuestionSelector;
use crate::tracker::ProgressSummary;

/// Entry point for the web layer. Every call takes a session snapshot and
/// either returns a new session or fails leaving the input untouched.
#[derive(Debug, Clone)]
pub struct AssessmentEngine<'a> {
    bank: &'a QuestionBank,
    config: EngineConfig,
}

impl AssessmentEngine<'static> {
    /// The compiled-in bank with default configuration.
    pub fn standard() -> Self {
        Self {
            bank: standard_bank(),
            config: EngineConfig::default(),
        }
    }
}

impl<'a> AssessmentEngine<'a> {
    pub fn new(bank: &'a QuestionBank, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { bank, config })
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selector(&self) -> QuestionSelector<'_> {
        QuestionSelector::new(self.bank, &self.config)
    }

    pub fn start_session(&self, client_id: Uuid, respondent: RespondentProfile) -> Session {
        self.start_session_at(client_id, respondent, Timestamp::now())
    }

    pub fn start_session_at(&self, client_id: Uuid, respondent: RespondentProfile, now: Timestamp) -> Session {
        let mut session = Session::new(client_id, respondent, now);
        for module in self.bank.modules() {
            session.modules.insert(
                module.id.clone(),
                ModuleState::new(&module.id, module.full_question_count()),
            );
        }
        self.refresh_module_states(&mut session);
        tracing::info!(session_id = %session.id, client_id = %client_id, "assessment session started");
        session
    }

    pub fn select_next(&self, session: &Session) -> Result<NextQuestionOutcome, EngineError> {
        check_consistency(self.bank, session)?;
        let outcome = self.selector().select_next(session);
        match &outcome {
            NextQuestionOutcome::Question { question, reasoning } => {
                tracing::debug!(
                    session_id = %session.id,
                    question_id = %question.id,
                    reasoning = %reasoning,
                    "question selected"
                );
            }
            NextQuestionOutcome::ModuleComplete { module_id, status, .. } => {
                tracing::debug!(session_id = %session.id, module_id = %module_id, ?status, "module ready to close");
            }
            NextQuestionOutcome::ValidationRequired { risk, .. } => {
                tracing::debug!(session_id = %session.id, risk, "validation step required");
            }
            NextQuestionOutcome::AssessmentComplete { reason } => {
                tracing::debug!(session_id = %session.id, ?reason, "assessment complete");
            }
        }
        Ok(outcome)
    }

    pub fn apply(&self, session: &Session, outcome: &NextQuestionOutcome) -> Result<Session, EngineError> {
        self.apply_at(session, outcome, Timestamp::now())
    }

    /// Commit a selector outcome to a new session value.
    pub fn apply_at(
        &self,
        session: &Session,
        outcome: &NextQuestionOutcome,
        now: Timestamp,
    ) -> Result<Session, EngineError> {
        let mut next = session.clone();
        match outcome {
            NextQuestionOutcome::Question { question, .. } => {
                require(session, SessionStatus::InProgress, "ask a question")?;
                if session.has_answered(&question.id) {
                    return Err(EngineError::invalid_question(&question.id, "already answered in this session"));
                }
                if !question.is_follow_up {
                    next.current_module = Some(question.module_id.clone());
                }
                if !next.modules_visited.contains(&question.module_id) {
                    next.modules_visited.push(question.module_id.clone());
                }
                let state = next
                    .modules
                    .entry(question.module_id.clone())
                    .or_insert_with(|| ModuleState::new(&question.module_id, 0));
                if state.status == ModuleStatus::NotStarted {
                    state.status = ModuleStatus::InProgress;
                }
            }
            NextQuestionOutcome::ModuleComplete {
                module_id,
                status,
                questions_saved,
                next_module,
            } => {
                require(session, SessionStatus::InProgress, "close a module")?;
                if !status.is_terminal() {
                    return Err(EngineError::InvalidTransition {
                        action: "close a module with a non-terminal status",
                        status: session.status,
                    });
                }
                let state = next
                    .modules
                    .entry(module_id.clone())
                    .or_insert_with(|| ModuleState::new(module_id, 0));
                state.status = *status;
                state.questions_saved = *questions_saved;
                state.estimated_total = state.questions_asked;
                next.current_module = next_module.clone();
                tracing::info!(
                    session_id = %session.id,
                    module_id = %module_id,
                    ?status,
                    questions_saved,
                    "module closed"
                );
            }
            NextQuestionOutcome::ValidationRequired { risk, .. } => {
                if session.status == SessionStatus::Completed {
                    return Err(EngineError::InvalidTransition {
                        action: "request validation",
                        status: session.status,
                    });
                }
                next.status = SessionStatus::AwaitingValidation;
                next.validation_shown = true;
                tracing::info!(session_id = %session.id, risk, "possible under-reporting; validation shown");
            }
            NextQuestionOutcome::AssessmentComplete { reason } => {
                if session.status != SessionStatus::Completed {
                    next.status = SessionStatus::Completed;
                    next.completed_at = Some(now);
                    tracing::info!(
                        session_id = %session.id,
                        ?reason,
                        questions_asked = session.questions_asked(),
                        questions_saved = session.questions_saved(),
                        "assessment completed"
                    );
                }
            }
        }
        Ok(next)
    }

    pub fn record_response(
        &self,
        session: &Session,
        question_id: &str,
        value: ResponseValue,
    ) -> Result<Session, EngineError> {
        self.record_response_at(session, question_id, value, Timestamp::now())
    }

    /// Append one answer to the ledger. Rejects unknown, already answered
    /// or inapplicable questions and values that do not fit the question.
    pub fn record_response_at(
        &self,
        session: &Session,
        question_id: &str,
        value: ResponseValue,
        now: Timestamp,
    ) -> Result<Session, EngineError> {
        require(session, SessionStatus::InProgress, "record a response")?;
        let question = self
            .bank
            .question(question_id)
            .ok_or_else(|| EngineError::invalid_question(question_id, "not in the question bank"))?;
        if session.has_answered(question_id) {
            return Err(EngineError::invalid_question(question_id, "already answered in this session"));
        }
        let selector = self.selector();
        let eval = selector.evaluate(session);
        if !selector
            .tracker()
            .accepts_answer(question, session, &eval.ledger, &eval.patterns, &eval.active)
        {
            return Err(EngineError::invalid_question(question_id, "not applicable to this session"));
        }
        question.validate(&value)?;

        let mut next = session.clone();
        next.responses.push(Response::new(question, value, now));
        let state = next
            .modules
            .entry(question.module_id.clone())
            .or_insert_with(|| ModuleState::new(&question.module_id, 0));
        state.questions_asked += 1;
        if state.status == ModuleStatus::NotStarted {
            state.status = ModuleStatus::InProgress;
        }
        self.refresh_module_states(&mut next);
        Ok(next)
    }

    /// Record an answer in the loose JSON shape the web layer submits.
    pub fn record_raw(
        &self,
        session: &Session,
        question_id: &str,
        raw: &serde_json::Value,
    ) -> Result<Session, EngineError> {
        let question = self
            .bank
            .question(question_id)
            .ok_or_else(|| EngineError::invalid_question(question_id, "not in the question bank"))?;
        let value = ResponseValue::from_raw(question, raw)?;
        self.record_response(session, question_id, value)
    }

    pub fn acknowledge_validation(
        &self,
        session: &Session,
        choice: ValidationChoice,
    ) -> Result<Session, EngineError> {
        require(session, SessionStatus::AwaitingValidation, "acknowledge validation")?;
        let mut next = session.clone();
        next.status = SessionStatus::InProgress;
        next.validation_choice = Some(choice);
        tracing::info!(session_id = %session.id, ?choice, "validation acknowledged");
        Ok(next)
    }

    /// Select and apply in one step.
    pub fn next_step(&self, session: &Session) -> Result<(Session, NextQuestionOutcome), EngineError> {
        let outcome = self.select_next(session)?;
        let next = self.apply(session, &outcome)?;
        Ok((next, outcome))
    }

    /// Mark a session whose ledger no longer matches the bank.
    pub fn flag_for_review(&self, session: &Session) -> Session {
        tracing::warn!(session_id = %session.id, "session flagged for review");
        let mut next = session.clone();
        next.needs_review = true;
        next
    }

    pub fn detect_patterns(&self, session: &Session) -> Vec<DetectedPattern> {
        self.selector().evaluate(session).patterns
    }

    pub fn under_reporting_risk(&self, session: &Session) -> f64 {
        let patterns = self.detect_patterns(session);
        UnderReportingMonitor::new(self.config.under_reporting.clone()).risk(&session.responses, &patterns)
    }

    pub fn progress(&self, session: &Session) -> ProgressSummary {
        let selector = self.selector();
        let eval = selector.evaluate(session);
        selector.tracker().progress(session, &eval.ledger, &eval.patterns)
    }

    /// Score a completed session.
    pub fn snapshot(&self, session: &Session) -> Result<AnalysisSnapshot, EngineError> {
        require(session, SessionStatus::Completed, "score")?;
        check_consistency(self.bank, session)?;

        let patterns = self.detect_patterns(session);
        let scores = Scorer::new(self.bank, &self.config).score(&session.responses);
        let under_reporting_risk = UnderReportingMonitor::new(self.config.under_reporting.clone())
            .risk(&session.responses, &patterns);

        Ok(AnalysisSnapshot {
            session_id: session.id,
            client_id: session.client_id,
            completed_at: session.completed_at.unwrap_or(session.created_at),
            overall_score: scores.overall,
            risk_level: risk_level(scores.overall, &patterns),
            module_scores: scores.module_scores,
            patterns,
            under_reporting_risk,
            questions_asked: session.questions_asked(),
            questions_saved: session.questions_saved(),
            skipped_responses: scores.skipped,
        })
    }

    pub fn aggregate<I>(&self, results: I) -> CrossReportAggregate
    where
        I: IntoIterator<Item = Result<AnalysisSnapshot, EngineError>>,
    {
        aggregate::aggregate(results, self.config.trend_change)
    }

    fn refresh_module_states(&self, session: &mut Session) {
        let selector = self.selector();
        let updates: Vec<(String, Vec<String>, usize)> = {
            let eval = selector.evaluate(session);
            self.bank
                .modules()
                .iter()
                .map(|module| {
                    let active = eval
                        .evidence
                        .iter()
                        .filter(|e| e.is_active())
                        .filter(|e| {
                            e.definition.conditions().any(|c| {
                                self.bank
                                    .question(&c.question_id)
                                    .is_some_and(|q| q.module_id == module.id)
                            })
                        })
                        .map(|e| e.definition.name.clone())
                        .collect();
                    let total = selector
                        .tracker()
                        .estimated_total(module, session, &eval.ledger, &eval.active);
                    (module.id.clone(), active, total)
                })
                .collect()
        };
        for (module_id, active, total) in updates {
            let state = session
                .modules
                .entry(module_id.clone())
                .or_insert_with(|| ModuleState::new(&module_id, total));
            state.active_patterns = active;
            state.estimated_total = total;
        }
    }
}

fn require(session: &Session, status: SessionStatus, action: &'static str) -> Result<(), EngineError> {
    if session.status == status {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition {
            action,
            status: session.status,
        })
    }
}
