//! Per-session severity scoring.

use std::collections::BTreeMap;

use intake_bank::QuestionBank;
use intake_core::models::analysis::RiskLevel;
use intake_core::models::pattern::{DetectedPattern, Urgency};
use intake_core::models::response::Response;

use crate::config::EngineConfig;
use crate::severity::answer_severity;

/// Module and overall scores for one ledger, each 0–100.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionScores {
    pub module_scores: BTreeMap<String, f64>,
    pub overall: f64,
    /// Responses that carried scoring weight but could not be scored.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    bank: &'a QuestionBank,
    config: &'a EngineConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(bank: &'a QuestionBank, config: &'a EngineConfig) -> Self {
        Self { bank, config }
    }

    /// Module score: weighted mean of answer severities, times 100.
    /// Overall: mean of module scores weighted by module emphasis, over
    /// the modules that have a score. Responses to questions the bank does
    /// not know are skipped and counted.
    pub fn score(&self, responses: &[Response]) -> SessionScores {
        // module id -> (weighted severity sum, weight sum)
        let mut sums: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
        let mut skipped = 0;

        for response in responses {
            let Some(question) = self.bank.question(&response.question_id) else {
                skipped += 1;
                continue;
            };
            if question.scoring_weight <= 0.0 {
                continue;
            }
            match answer_severity(question, &response.value) {
                Some(severity) => {
                    let entry = sums.entry(question.module_id.as_str()).or_default();
                    entry.0 += severity * question.scoring_weight;
                    entry.1 += question.scoring_weight;
                }
                None => {
                    tracing::debug!(question_id = %question.id, "response skipped from scoring");
                    skipped += 1;
                }
            }
        }

        let module_scores: BTreeMap<String, f64> = sums
            .into_iter()
            .filter(|(_, (_, weight))| *weight > 0.0)
            .map(|(id, (total, weight))| (id.to_string(), (total / weight * 100.0).clamp(0.0, 100.0)))
            .collect();

        let mut weighted = 0.0;
        let mut emphasis_total = 0.0;
        for (module_id, score) in &module_scores {
            let emphasis = self
                .bank
                .module(module_id)
                .map_or(1.0, |m| self.config.emphasis(m));
            weighted += score * emphasis;
            emphasis_total += emphasis;
        }
        let overall = if emphasis_total > 0.0 {
            (weighted / emphasis_total).clamp(0.0, 100.0)
        } else {
            0.0
        };

        SessionScores {
            module_scores,
            overall,
            skipped,
        }
    }
}

pub fn risk_level(overall: f64, patterns: &[DetectedPattern]) -> RiskLevel {
    let urgent = patterns
        .iter()
        .any(|p| p.is_active() && p.urgency == Urgency::High);
    if overall >= 70.0 || urgent {
        RiskLevel::Critical
    } else if overall >= 50.0 {
        RiskLevel::High
    } else if overall >= 30.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
