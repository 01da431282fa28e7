//! Under-reporting monitor.
//!
//! A respondent who marks nearly every scale question at the mildest
//! level while the ledger still supports an active pattern is likely
//! downplaying symptoms. The risk is binary: high or baseline.

use intake_core::models::pattern::DetectedPattern;
use intake_core::models::response::{Response, ResponseValue};

use crate::config::UnderReportingConfig;

/// Patterns below this confidence get probe questions at the validation step.
pub const PROBE_CONFIDENCE: f64 = 0.7;

/// Probe questions taken from each weakly supported pattern.
const PROBES_PER_PATTERN: usize = 2;

/// The mildest tier on every scale question.
const MILDEST: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct UnderReportingMonitor {
    config: UnderReportingConfig,
}

impl UnderReportingMonitor {
    pub fn new(config: UnderReportingConfig) -> Self {
        Self { config }
    }

    /// `high_risk` when at least `mild_fraction` of scale answers sit at
    /// the mildest tier and at least one pattern is active, otherwise
    /// `baseline_risk`. An empty ledger is baseline.
    pub fn risk(&self, responses: &[Response], patterns: &[DetectedPattern]) -> f64 {
        let Some(fraction) = mild_fraction(responses) else {
            return self.config.baseline_risk;
        };
        let any_active = patterns.iter().any(DetectedPattern::is_active);
        if any_active && fraction + 1e-9 >= self.config.mild_fraction {
            self.config.high_risk
        } else {
            self.config.baseline_risk
        }
    }
}

/// Share of scale answers at the mildest tier, or `None` if no scale
/// question has been answered.
pub fn mild_fraction(responses: &[Response]) -> Option<f64> {
    let mut scale = 0usize;
    let mut mild = 0usize;
    for response in responses {
        if let ResponseValue::Scale(v) = response.value {
            scale += 1;
            if (v - MILDEST).abs() < 1e-9 {
                mild += 1;
            }
        }
    }
    (scale > 0).then(|| mild as f64 / scale as f64)
}

/// The first two follow-ups of every pattern below [`PROBE_CONFIDENCE`],
/// de-duplicated, in pattern order.
pub fn suggest_validation_questions(patterns: &[DetectedPattern]) -> Vec<String> {
    let mut suggested: Vec<String> = Vec::new();
    for pattern in patterns.iter().filter(|p| p.confidence < PROBE_CONFIDENCE) {
        for id in pattern.follow_ups.iter().take(PROBES_PER_PATTERN) {
            if !suggested.contains(id) {
                suggested.push(id.clone());
            }
        }
    }
    suggested
}
