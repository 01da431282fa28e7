use serde::{Deserialize, Serialize};
use ts_rs::TS;

use intake_core::models::pattern::{PatternCategory, Urgency};
use intake_core::models::question::Question;

/// A topical grouping of questions (digestive, energy, hormonal, ...).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModuleDefinition {
    pub id: String,
    pub name: String,
    /// Questions to ask before the module may close early.
    pub min_questions: usize,
    /// Questions after which the module closes regardless of open evidence.
    #[serde(default)]
    pub max_questions: Option<usize>,
    /// Weight of this module in the overall score.
    pub emphasis: f64,
    /// Base questions in asking order, plus the follow-ups that live here.
    pub questions: Vec<Question>,
    pub description: Option<String>,
}

impl ModuleDefinition {
    /// Questions asked during normal module progression, in order.
    pub fn base_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| !q.is_follow_up)
    }

    pub fn full_question_count(&self) -> usize {
        self.base_questions().count()
    }
}

/// How a single answer counts as evidence for a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum MarkerRule {
    /// Answer falls in the N most severe tiers of the question.
    TopTiers(u8),
    AtLeast(f64),
    AtMost(f64),
    Equals(String),
    AnyOf(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MarkerCondition {
    pub question_id: String,
    pub rule: MarkerRule,
}

impl MarkerCondition {
    pub fn new(question_id: &str, rule: MarkerRule) -> Self {
        Self {
            question_id: question_id.to_string(),
            rule,
        }
    }
}

/// A named symptom cluster as a rule table entry. Adding a pattern is a
/// data change: no code is written per pattern.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatternDefinition {
    pub name: String,
    pub display_name: String,
    pub category: PatternCategory,
    pub urgency: Urgency,
    pub required: Vec<MarkerCondition>,
    #[serde(default)]
    pub supporting: Vec<MarkerCondition>,
    /// Required markers that must hold before the pattern is reported.
    pub min_required: usize,
    /// Overrides the engine-wide activation threshold.
    #[serde(default)]
    pub activation_threshold: Option<f64>,
    #[serde(default)]
    pub follow_ups: Vec<String>,
    /// Modules promoted while the pattern is active.
    #[serde(default)]
    pub related_modules: Vec<String>,
}

impl PatternDefinition {
    pub fn conditions(&self) -> impl Iterator<Item = &MarkerCondition> {
        self.required.iter().chain(self.supporting.iter())
    }

    pub fn condition_count(&self) -> usize {
        self.required.len() + self.supporting.len()
    }

    pub fn has_marker(&self, question_id: &str) -> bool {
        self.conditions().any(|c| c.question_id == question_id)
    }
}
