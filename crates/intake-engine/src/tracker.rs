//! Module progression: which module comes next, which questions in it are
//! still applicable, and how far along the assessment is.

use std::collections::HashSet;

use serde::Serialize;

use intake_bank::catalog::ModuleDefinition;
use intake_bank::QuestionBank;
use intake_core::models::pattern::DetectedPattern;
use intake_core::models::question::Question;
use intake_core::models::session::Session;

use crate::config::EngineConfig;
use crate::ledger::LedgerView;
use crate::severity::answer_severity;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub questions_asked: usize,
    pub questions_saved: usize,
    pub estimated_remaining: usize,
    pub estimated_minutes: u32,
    pub modules_total: usize,
    pub modules_closed: usize,
    pub current_module: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ModuleTracker<'a> {
    bank: &'a QuestionBank,
    config: &'a EngineConfig,
}

impl<'a> ModuleTracker<'a> {
    pub fn new(bank: &'a QuestionBank, config: &'a EngineConfig) -> Self {
        Self { bank, config }
    }

    /// Modules promoted ahead of the default order, in bank order: related
    /// modules of active patterns, modules named by a module trigger whose
    /// condition an answer met, and modules holding a raised red flag.
    pub fn elevated_modules(&self, ledger: &LedgerView<'_>, patterns: &[DetectedPattern]) -> Vec<&'a str> {
        let mut elevated: HashSet<&str> = HashSet::new();
        for pattern in patterns.iter().filter(|p| p.is_active()) {
            if let Some(def) = self.bank.pattern(&pattern.name) {
                elevated.extend(def.related_modules.iter().map(String::as_str));
            }
        }
        for response in ledger.responses() {
            let Some(question) = self.bank.question(&response.question_id) else {
                continue;
            };
            for trigger in &question.module_triggers {
                if trigger.condition.matches(&response.value) {
                    elevated.insert(trigger.module_id.as_str());
                }
            }
        }
        elevated.extend(self.raised_red_flags(ledger).iter().map(|q| q.module_id.as_str()));
        self.bank
            .modules()
            .iter()
            .filter(|m| elevated.contains(m.id.as_str()))
            .map(|m| m.id.as_str())
            .collect()
    }

    /// Highest-priority module not in `terminal`: elevated modules first,
    /// then the bank's order.
    pub fn next_module(&self, terminal: &HashSet<&str>, elevated: &[&str]) -> Option<&'a ModuleDefinition> {
        let mut open = self
            .bank
            .modules()
            .iter()
            .filter(|m| !terminal.contains(m.id.as_str()));
        let first_open = open.clone().next();
        open.find(|m| elevated.contains(&m.id.as_str())).or(first_open)
    }

    /// Red-flag questions answered above their mildest option.
    pub fn raised_red_flags(&self, ledger: &LedgerView<'_>) -> Vec<&'a Question> {
        ledger
            .responses()
            .iter()
            .filter_map(|r| {
                let question = self.bank.question(&r.question_id)?;
                let raised = question.red_flag
                    && answer_severity(question, &r.value).is_some_and(|s| s > 0.0);
                raised.then_some(question)
            })
            .collect()
    }

    /// Whether an answer to `question` may be recorded now. Follow-ups are
    /// only open while a pattern listing them is active.
    pub fn accepts_answer(
        &self,
        question: &Question,
        session: &Session,
        ledger: &LedgerView<'_>,
        patterns: &[DetectedPattern],
        active: &HashSet<&str>,
    ) -> bool {
        if question.is_follow_up
            && !patterns
                .iter()
                .any(|p| p.is_active() && p.follow_ups.contains(&question.id))
        {
            return false;
        }
        self.is_applicable(question, session, ledger, active)
    }

    /// Whether `question` may be asked given everything answered so far.
    pub fn is_applicable(
        &self,
        question: &Question,
        session: &Session,
        ledger: &LedgerView<'_>,
        active: &HashSet<&str>,
    ) -> bool {
        if !question.is_follow_up
            && !question.trigger_patterns.is_empty()
            && !question
                .trigger_patterns
                .iter()
                .any(|p| active.contains(p.as_str()))
        {
            return false;
        }
        if let Some(sex) = question.applies_to
            && session.respondent.sex != Some(sex)
        {
            return false;
        }
        !ledger.is_skipped(&question.id) && ledger.precondition_met(question)
    }

    /// Unanswered, applicable base questions of `module` in asking order.
    pub fn remaining_questions(
        &self,
        module: &'a ModuleDefinition,
        session: &Session,
        ledger: &LedgerView<'_>,
        active: &HashSet<&str>,
    ) -> Vec<&'a Question> {
        module
            .base_questions()
            .filter(|q| !ledger.is_answered(&q.id))
            .filter(|q| self.is_applicable(q, session, ledger, active))
            .collect()
    }

    /// Questions asked in the module so far plus those that may still be,
    /// bounded by the module's question cap.
    pub fn estimated_total(
        &self,
        module: &'a ModuleDefinition,
        session: &Session,
        ledger: &LedgerView<'_>,
        active: &HashSet<&str>,
    ) -> usize {
        let asked = session
            .modules
            .get(&module.id)
            .map_or(0, |m| m.questions_asked);
        if session.module_status(&module.id).is_terminal() {
            return asked;
        }
        let cap = self.config.question_cap(module).max(asked);
        (asked + self.remaining_questions(module, session, ledger, active).len()).min(cap)
    }

    pub fn progress(
        &self,
        session: &Session,
        ledger: &LedgerView<'_>,
        patterns: &[DetectedPattern],
    ) -> ProgressSummary {
        let active: HashSet<&str> = patterns
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.name.as_str())
            .collect();

        let mut remaining: HashSet<&str> = HashSet::new();
        for module in self.bank.modules() {
            if session.module_status(&module.id).is_terminal() {
                continue;
            }
            let asked_here = session
                .modules
                .get(&module.id)
                .map_or(0, |m| m.questions_asked);
            let room = self.config.question_cap(module).saturating_sub(asked_here);
            remaining.extend(
                self.remaining_questions(module, session, ledger, &active)
                    .into_iter()
                    .take(room)
                    .map(|q| q.id.as_str()),
            );
        }
        for pattern in patterns.iter().filter(|p| p.is_active()) {
            for id in &pattern.follow_ups {
                if let Some(question) = self.bank.question(id)
                    && !ledger.is_answered(id)
                    && self.is_applicable(question, session, ledger, &active)
                {
                    remaining.insert(question.id.as_str());
                }
            }
        }

        let asked = session.questions_asked();
        let estimated_remaining = remaining
            .len()
            .min(self.config.max_questions.saturating_sub(asked));
        let seconds = estimated_remaining as u64 * u64::from(self.config.seconds_per_question);

        ProgressSummary {
            questions_asked: asked,
            questions_saved: session.questions_saved(),
            estimated_remaining,
            estimated_minutes: seconds.div_ceil(60) as u32,
            modules_total: self.bank.modules().len(),
            modules_closed: self
                .bank
                .modules()
                .iter()
                .filter(|m| session.module_status(&m.id).is_terminal())
                .count(),
            current_module: session.current_module.clone(),
        }
    }
}

/// Ids of modules that have closed.
pub fn terminal_modules(session: &Session) -> HashSet<&str> {
    session
        .modules
        .values()
        .filter(|m| m.status.is_terminal())
        .map(|m| m.module_id.as_str())
        .collect()
}
