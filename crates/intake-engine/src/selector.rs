//! Adaptive question selection.
//!
//! [`QuestionSelector::select_next`] is a pure function of the session:
//! it never mutates anything. Feed its outcome to the engine's `apply` to
//! move the session forward.

use std::collections::HashSet;

use intake_bank::catalog::ModuleDefinition;
use intake_bank::QuestionBank;
use intake_core::models::outcome::{CompletionReason, NextQuestionOutcome};
use intake_core::models::pattern::DetectedPattern;
use intake_core::models::question::Question;
use intake_core::models::session::{ModuleStatus, Session, SessionStatus};

use crate::config::EngineConfig;
use crate::ledger::LedgerView;
use crate::monitor::{suggest_validation_questions, UnderReportingMonitor};
use crate::patterns::{self, PatternEvidence, PatternMatcher};
use crate::tracker::{terminal_modules, ModuleTracker};

/// Everything derived from one session's ledger.
#[derive(Debug)]
pub struct Evaluation<'s> {
    pub ledger: LedgerView<'s>,
    pub evidence: Vec<PatternEvidence<'s>>,
    pub patterns: Vec<DetectedPattern>,
    pub active: HashSet<&'s str>,
}

#[derive(Debug, Clone)]
pub struct QuestionSelector<'a> {
    bank: &'a QuestionBank,
    config: &'a EngineConfig,
    matcher: PatternMatcher<'a>,
    monitor: UnderReportingMonitor,
    tracker: ModuleTracker<'a>,
}

impl<'a> QuestionSelector<'a> {
    pub fn new(bank: &'a QuestionBank, config: &'a EngineConfig) -> Self {
        Self {
            bank,
            config,
            matcher: PatternMatcher::new(bank, config.activation_threshold),
            monitor: UnderReportingMonitor::new(config.under_reporting.clone()),
            tracker: ModuleTracker::new(bank, config),
        }
    }

    pub fn tracker(&self) -> &ModuleTracker<'a> {
        &self.tracker
    }

    pub fn evaluate<'s>(&'s self, session: &'s Session) -> Evaluation<'s> {
        let ledger = LedgerView::new(self.bank, &session.responses);
        let evidence = self.matcher.evaluate(&session.responses);
        let patterns = patterns::detected(&evidence);
        let active = evidence
            .iter()
            .filter(|e| e.is_active())
            .map(|e| e.definition.name.as_str())
            .collect();
        Evaluation {
            ledger,
            evidence,
            patterns,
            active,
        }
    }

    pub fn select_next(&self, session: &Session) -> NextQuestionOutcome {
        match session.status {
            SessionStatus::Completed => {
                return NextQuestionOutcome::AssessmentComplete {
                    reason: self.completion_reason(session),
                };
            }
            SessionStatus::AwaitingValidation => {
                let eval = self.evaluate(session);
                return self.validation(session, &eval);
            }
            SessionStatus::InProgress => {}
        }

        if session.questions_asked() >= self.config.max_questions {
            return NextQuestionOutcome::AssessmentComplete {
                reason: CompletionReason::QuestionCap,
            };
        }

        let eval = self.evaluate(session);
        let risk = self.monitor.risk(&session.responses, &eval.patterns);
        if risk > self.config.validation_risk_threshold && !session.validation_shown {
            return self.validation(session, &eval);
        }

        if let Some((question, pattern)) = self.next_follow_up(session, &eval) {
            return NextQuestionOutcome::Question {
                question: question.clone(),
                reasoning: format!(
                    "follow-up for {} (confidence {:.2})",
                    pattern.display_name, pattern.confidence
                ),
            };
        }

        let Some(module) = self.current_or_next(session, &eval) else {
            return NextQuestionOutcome::AssessmentComplete {
                reason: CompletionReason::AllModulesTerminal,
            };
        };

        let remaining = self
            .tracker
            .remaining_questions(module, session, &eval.ledger, &eval.active);
        let Some(next) = remaining.first() else {
            return self.close(module, ModuleStatus::Complete, session, &eval);
        };

        let asked = session
            .modules
            .get(&module.id)
            .map_or(0, |m| m.questions_asked);
        if asked >= self.config.question_cap(module) {
            return self.close(module, ModuleStatus::Sufficient, session, &eval);
        }
        let minimum = self.config.min_questions(module);
        if asked >= minimum && !self.has_unresolved(module, session, &eval) {
            return self.close(module, ModuleStatus::Sufficient, session, &eval);
        }

        NextQuestionOutcome::Question {
            question: (*next).clone(),
            reasoning: if asked < minimum {
                format!("{}: {} of {minimum} minimum questions asked", module.name, asked)
            } else {
                format!("{}: following up unresolved evidence", module.name)
            },
        }
    }

    fn completion_reason(&self, session: &Session) -> CompletionReason {
        if session.questions_asked() >= self.config.max_questions {
            CompletionReason::QuestionCap
        } else {
            CompletionReason::AllModulesTerminal
        }
    }

    fn validation(&self, session: &Session, eval: &Evaluation<'_>) -> NextQuestionOutcome {
        NextQuestionOutcome::ValidationRequired {
            risk: self.monitor.risk(&session.responses, &eval.patterns),
            suggested_questions: suggest_validation_questions(&eval.patterns),
        }
    }

    /// First unanswered, applicable follow-up of the most confident active
    /// pattern that still has one.
    fn next_follow_up<'e>(
        &self,
        session: &Session,
        eval: &'e Evaluation<'_>,
    ) -> Option<(&'a Question, &'e DetectedPattern)> {
        eval.patterns
            .iter()
            .filter(|p| p.is_active())
            .find_map(|pattern| {
                pattern
                    .follow_ups
                    .iter()
                    .filter_map(|id| self.bank.question(id))
                    .find(|q| {
                        !eval.ledger.is_answered(&q.id)
                            && self
                                .tracker
                                .is_applicable(q, session, &eval.ledger, &eval.active)
                    })
                    .map(|q| (q, pattern))
            })
    }

    fn current_or_next(&self, session: &Session, eval: &Evaluation<'_>) -> Option<&'a ModuleDefinition> {
        let current = session
            .current_module
            .as_deref()
            .and_then(|id| self.bank.module(id))
            .filter(|m| !session.module_status(&m.id).is_terminal());
        if current.is_some() {
            return current;
        }
        let elevated = self.tracker.elevated_modules(&eval.ledger, &eval.patterns);
        self.tracker.next_module(&terminal_modules(session), &elevated)
    }

    /// A raised red flag in `module`, or a pattern with markers there that
    /// still needs questions: partial evidence with applicable markers
    /// unanswered, or active with follow-ups pending.
    fn has_unresolved(&self, module: &ModuleDefinition, session: &Session, eval: &Evaluation<'_>) -> bool {
        if self
            .tracker
            .raised_red_flags(&eval.ledger)
            .iter()
            .any(|q| q.module_id == module.id)
        {
            return true;
        }

        let in_module = |id: &str| {
            self.bank
                .question(id)
                .filter(|q| q.module_id == module.id)
        };
        let pending = |id: &str| {
            self.bank.question(id).is_some_and(|q| {
                !eval.ledger.is_answered(id)
                    && self
                        .tracker
                        .is_applicable(q, session, &eval.ledger, &eval.active)
            })
        };

        eval.evidence
            .iter()
            .filter(|e| e.definition.conditions().any(|c| in_module(&c.question_id).is_some()))
            .any(|e| {
                if e.is_active() {
                    e.definition.follow_ups.iter().any(|id| pending(id))
                } else {
                    !e.satisfied.is_empty()
                        && e.pending
                            .iter()
                            .any(|id| in_module(id).is_some() && pending(id))
                }
            })
    }

    fn close(
        &self,
        module: &ModuleDefinition,
        status: ModuleStatus,
        session: &Session,
        eval: &Evaluation<'_>,
    ) -> NextQuestionOutcome {
        let asked = session
            .modules
            .get(&module.id)
            .map_or(0, |m| m.questions_asked);
        let mut terminal = terminal_modules(session);
        terminal.insert(module.id.as_str());
        let elevated = self.tracker.elevated_modules(&eval.ledger, &eval.patterns);
        NextQuestionOutcome::ModuleComplete {
            module_id: module.id.clone(),
            status,
            questions_saved: module.full_question_count().saturating_sub(asked),
            next_module: self
                .tracker
                .next_module(&terminal, &elevated)
                .map(|m| m.id.clone()),
        }
    }
}
