use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PatternCategory {
    Metabolic,
    Hormonal,
    Inflammatory,
    Nutritional,
    Digestive,
    Sleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// A symptom cluster inferred from the response ledger. Always recomputed
/// from the ledger, never stored as ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetectedPattern {
    pub name: String,
    pub display_name: String,
    pub confidence: f64,
    /// Ids of the answered questions whose responses support the pattern.
    pub supporting_responses: Vec<String>,
    pub category: PatternCategory,
    pub urgency: Urgency,
    /// Follow-up question ids, highest priority first.
    #[serde(default)]
    pub follow_ups: Vec<String>,
    pub activation_threshold: f64,
}

impl DetectedPattern {
    /// Active patterns drive follow-ups and module promotion.
    pub fn is_active(&self) -> bool {
        self.confidence > self.activation_threshold
    }
}
