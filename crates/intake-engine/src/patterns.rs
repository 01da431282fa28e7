//! Pattern matcher: response ledger in, detected symptom clusters out.
//!
//! Every marker refers to exactly one answer and answers are never
//! rewritten, so appending responses can only satisfy more markers. The
//! denominator of the confidence is the fixed marker count of the
//! definition, which makes confidence monotonic without any stored state.

use std::collections::HashMap;

use intake_bank::catalog::{MarkerCondition, MarkerRule, PatternDefinition};
use intake_bank::QuestionBank;
use intake_core::models::pattern::DetectedPattern;
use intake_core::models::question::Question;
use intake_core::models::response::{Response, ResponseValue};

use crate::severity::in_top_tiers;

/// Partial evidence for one pattern, detected or not.
#[derive(Debug, Clone)]
pub struct PatternEvidence<'b> {
    pub definition: &'b PatternDefinition,
    /// Question ids of satisfied markers, in definition order.
    pub satisfied: Vec<String>,
    pub required_satisfied: usize,
    /// Marker questions with an answer on the ledger, satisfied or not.
    pub answered: usize,
    /// Marker questions not yet answered.
    pub pending: Vec<String>,
    pub confidence: f64,
    pub activation_threshold: f64,
}

impl PatternEvidence<'_> {
    pub fn is_detected(&self) -> bool {
        self.required_satisfied >= self.definition.min_required
    }

    pub fn is_active(&self) -> bool {
        self.is_detected() && self.confidence > self.activation_threshold
    }

    pub fn to_detected(&self) -> DetectedPattern {
        let def = self.definition;
        DetectedPattern {
            name: def.name.clone(),
            display_name: def.display_name.clone(),
            confidence: self.confidence,
            supporting_responses: self.satisfied.clone(),
            category: def.category,
            urgency: def.urgency,
            follow_ups: def.follow_ups.clone(),
            activation_threshold: self.activation_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher<'b> {
    bank: &'b QuestionBank,
    activation_threshold: f64,
}

impl<'b> PatternMatcher<'b> {
    pub fn new(bank: &'b QuestionBank, activation_threshold: f64) -> Self {
        Self {
            bank,
            activation_threshold,
        }
    }

    /// Evidence for every pattern in the bank, in definition order.
    pub fn evaluate(&self, responses: &[Response]) -> Vec<PatternEvidence<'b>> {
        let answers: HashMap<&str, &ResponseValue> = responses
            .iter()
            .map(|r| (r.question_id.as_str(), &r.value))
            .collect();
        self.bank
            .patterns()
            .iter()
            .map(|def| self.evaluate_one(def, &answers))
            .collect()
    }

    /// Detected patterns sorted by descending confidence; ties keep
    /// definition order. The result does not depend on ledger order.
    pub fn detect(&self, responses: &[Response]) -> Vec<DetectedPattern> {
        detected(&self.evaluate(responses))
    }

    fn evaluate_one(
        &self,
        def: &'b PatternDefinition,
        answers: &HashMap<&str, &ResponseValue>,
    ) -> PatternEvidence<'b> {
        let mut satisfied = Vec::new();
        let mut required_satisfied = 0;
        let mut answered = 0;
        let mut pending = Vec::new();
        let mut hits = 0usize;

        for (i, condition) in def.conditions().enumerate() {
            let Some(value) = answers.get(condition.question_id.as_str()) else {
                if !pending.contains(&condition.question_id) {
                    pending.push(condition.question_id.clone());
                }
                continue;
            };
            answered += 1;
            let Some(question) = self.bank.question(&condition.question_id) else {
                continue;
            };
            if marker_satisfied(question, condition, value) {
                hits += 1;
                if i < def.required.len() {
                    required_satisfied += 1;
                }
                if !satisfied.contains(&condition.question_id) {
                    satisfied.push(condition.question_id.clone());
                }
            }
        }

        let total = def.condition_count();
        let confidence = if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64).clamp(0.0, 1.0)
        };

        PatternEvidence {
            definition: def,
            satisfied,
            required_satisfied,
            answered,
            pending,
            confidence,
            activation_threshold: def.activation_threshold.unwrap_or(self.activation_threshold),
        }
    }
}

/// Detected patterns from already computed evidence, highest confidence first.
pub fn detected(evidence: &[PatternEvidence<'_>]) -> Vec<DetectedPattern> {
    let mut patterns: Vec<DetectedPattern> = evidence
        .iter()
        .filter(|e| e.is_detected())
        .map(PatternEvidence::to_detected)
        .collect();
    patterns.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    patterns
}

pub fn marker_satisfied(question: &Question, condition: &MarkerCondition, value: &ResponseValue) -> bool {
    match &condition.rule {
        MarkerRule::TopTiers(tiers) => in_top_tiers(question, value, *tiers),
        MarkerRule::AtLeast(threshold) => value.as_number().is_some_and(|v| v >= *threshold),
        MarkerRule::AtMost(threshold) => value.as_number().is_some_and(|v| v <= *threshold),
        MarkerRule::Equals(expected) => value.selects(expected),
        MarkerRule::AnyOf(expected) => expected.iter().any(|e| value.selects(e)),
    }
}
