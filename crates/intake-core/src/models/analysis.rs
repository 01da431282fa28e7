use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::pattern::DetectedPattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

/// Scored result of one completed session. This is what the narrative
/// collaborator and cross-report aggregation consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalysisSnapshot {
    pub session_id: Uuid,
    pub client_id: Uuid,
    pub completed_at: jiff::Timestamp,
    /// 0–100, higher means greater symptom burden.
    pub overall_score: f64,
    pub module_scores: BTreeMap<String, f64>,
    pub patterns: Vec<DetectedPattern>,
    pub under_reporting_risk: f64,
    pub risk_level: RiskLevel,
    pub questions_asked: usize,
    pub questions_saved: usize,
    /// Responses left out of module averages because they could not be scored.
    pub skipped_responses: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatternAggregate {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub trend: Trend,
    pub occurrences: usize,
    /// Confidence per contributing session, in completion order.
    pub scores: Vec<f64>,
    pub sessions: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Timeline {
    pub report_count: usize,
    pub earliest: Option<jiff::Timestamp>,
    pub latest: Option<jiff::Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FailedAnalysis {
    pub source: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregateMetadata {
    pub total_files: usize,
    pub successful_analyses: usize,
    pub failed_analyses: usize,
    pub failures: Vec<FailedAnalysis>,
}

/// Statistics across several completed sessions for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrossReportAggregate {
    pub patterns: BTreeMap<String, PatternAggregate>,
    /// Present in every successful session.
    pub persistent_patterns: Vec<String>,
    /// Present in exactly one session; empty unless there are several.
    pub emerging_patterns: Vec<String>,
    /// Highest-confidence instance of each pattern name.
    pub unique_patterns: Vec<DetectedPattern>,
    pub module_trends: BTreeMap<String, Trend>,
    pub overall_trend: Trend,
    pub timeline: Timeline,
    pub metadata: AggregateMetadata,
}
