//! Cross-report aggregation over a client's completed sessions.

use std::collections::{BTreeMap, HashSet};

use intake_core::models::analysis::{
    AggregateMetadata, AnalysisSnapshot, CrossReportAggregate, FailedAnalysis, PatternAggregate,
    Timeline, Trend,
};
use intake_core::models::pattern::DetectedPattern;

use crate::error::EngineError;

/// Parse one stored snapshot. Failures become [`EngineError::PartialAnalysis`]
/// so the aggregate can count them and carry on.
pub fn parse_snapshot(label: &str, json: &str) -> Result<AnalysisSnapshot, EngineError> {
    serde_json::from_str(json).map_err(|e| EngineError::PartialAnalysis {
        label: label.to_string(),
        reason: e.to_string(),
    })
}

/// Trend of `scores` taken in chronological order. The series is split at
/// its midpoint and the relative change between the two half averages is
/// compared against `threshold`. Higher scores mean worse.
pub fn classify_trend(scores: &[f64], threshold: f64) -> Trend {
    if scores.len() < 2 {
        return Trend::InsufficientData;
    }
    let (first, second) = scores.split_at(scores.len() / 2);
    let first_avg = mean(first);
    let second_avg = mean(second);

    if first_avg == 0.0 {
        return if second_avg > 0.0 {
            Trend::Worsening
        } else {
            Trend::Stable
        };
    }
    let change = (second_avg - first_avg) / first_avg;
    if change <= -threshold + 1e-9 {
        Trend::Improving
    } else if change >= threshold - 1e-9 {
        Trend::Worsening
    } else {
        Trend::Stable
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Reduce per-session results into a [`CrossReportAggregate`]. Failed
/// inputs and repeats of an already seen session are excluded and recorded
/// in the metadata; the remaining snapshots are ordered by completion time
/// before trends are computed.
pub fn aggregate<I>(results: I, trend_change: f64) -> CrossReportAggregate
where
    I: IntoIterator<Item = Result<AnalysisSnapshot, EngineError>>,
{
    let mut snapshots = Vec::new();
    let mut metadata = AggregateMetadata::default();
    let mut seen = HashSet::new();

    for result in results {
        metadata.total_files += 1;
        match result {
            Ok(snapshot) if !seen.insert(snapshot.session_id) => {
                let source = format!("input {}", metadata.total_files);
                tracing::warn!(source = %source, session_id = %snapshot.session_id, "duplicate session excluded from aggregate");
                metadata.failures.push(FailedAnalysis {
                    source,
                    reason: format!("duplicate session {}", snapshot.session_id),
                });
            }
            Ok(snapshot) => snapshots.push(snapshot),
            Err(e) => {
                let source = match &e {
                    EngineError::PartialAnalysis { label, .. } => label.clone(),
                    _ => format!("input {}", metadata.total_files),
                };
                tracing::warn!(source = %source, error = %e, "analysis excluded from aggregate");
                metadata.failures.push(FailedAnalysis {
                    source,
                    reason: e.to_string(),
                });
            }
        }
    }
    metadata.successful_analyses = snapshots.len();
    metadata.failed_analyses = metadata.failures.len();
    snapshots.sort_by_key(|s| s.completed_at);

    let mut patterns: BTreeMap<String, PatternAggregate> = BTreeMap::new();
    let mut best: BTreeMap<String, DetectedPattern> = BTreeMap::new();
    for snapshot in &snapshots {
        for pattern in &snapshot.patterns {
            let entry = patterns
                .entry(pattern.name.clone())
                .or_insert_with(|| PatternAggregate {
                    average: 0.0,
                    min: f64::INFINITY,
                    max: f64::NEG_INFINITY,
                    trend: Trend::InsufficientData,
                    occurrences: 0,
                    scores: Vec::new(),
                    sessions: Vec::new(),
                });
            // A pattern counts once per session.
            if entry.sessions.last() == Some(&snapshot.session_id) {
                continue;
            }
            entry.scores.push(pattern.confidence);
            entry.sessions.push(snapshot.session_id);
            entry.occurrences += 1;

            let keep = best
                .get(&pattern.name)
                .is_none_or(|b| pattern.confidence > b.confidence);
            if keep {
                best.insert(pattern.name.clone(), pattern.clone());
            }
        }
    }
    for entry in patterns.values_mut() {
        entry.average = mean(&entry.scores);
        entry.min = entry.scores.iter().copied().fold(f64::INFINITY, f64::min);
        entry.max = entry.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        entry.trend = classify_trend(&entry.scores, trend_change);
    }

    let successful = snapshots.len();
    let persistent_patterns = patterns
        .iter()
        .filter(|(_, p)| successful > 0 && p.occurrences == successful)
        .map(|(name, _)| name.clone())
        .collect();
    let emerging_patterns = patterns
        .iter()
        .filter(|(_, p)| successful > 1 && p.occurrences == 1)
        .map(|(name, _)| name.clone())
        .collect();

    let mut unique_patterns: Vec<DetectedPattern> = best.into_values().collect();
    unique_patterns.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut module_series: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for snapshot in &snapshots {
        for (module_id, score) in &snapshot.module_scores {
            module_series.entry(module_id.clone()).or_default().push(*score);
        }
    }
    let module_trends = module_series
        .into_iter()
        .map(|(id, series)| (id, classify_trend(&series, trend_change)))
        .collect();
    let overall: Vec<f64> = snapshots.iter().map(|s| s.overall_score).collect();

    CrossReportAggregate {
        patterns,
        persistent_patterns,
        emerging_patterns,
        unique_patterns,
        module_trends,
        overall_trend: classify_trend(&overall, trend_change),
        timeline: Timeline {
            report_count: successful,
            earliest: snapshots.first().map(|s| s.completed_at),
            latest: snapshots.last().map(|s| s.completed_at),
        },
        metadata,
    }
}
