//! Boundary to the narrative collaborator.
//!
//! The engine hands a finished [`AnalysisSnapshot`] to a [`Narrator`] and
//! gets prose back. Narrators only read the snapshot; nothing they return
//! flows back into scores.

use std::fmt::Write as _;

use intake_bank::QuestionBank;
use intake_core::models::analysis::AnalysisSnapshot;

use crate::error::NarrativeError;

pub trait Narrator {
    fn generate_narrative(&self, snapshot: &AnalysisSnapshot) -> Result<String, NarrativeError>;
}

/// Render the structured block a narrator receives: overall figures,
/// module scores with display names, and detected patterns.
pub fn build_narrative_input(snapshot: &AnalysisSnapshot, bank: &QuestionBank) -> String {
    let mut block = String::from("<assessment_analysis>\n");

    let _ = writeln!(
        block,
        "<summary overall_score=\"{:.1}\" risk_level=\"{:?}\" under_reporting_risk=\"{:.2}\" questions_asked=\"{}\" questions_saved=\"{}\"/>",
        snapshot.overall_score,
        snapshot.risk_level,
        snapshot.under_reporting_risk,
        snapshot.questions_asked,
        snapshot.questions_saved,
    );

    if !snapshot.module_scores.is_empty() {
        block.push_str("<modules>\n");
        for (module_id, score) in &snapshot.module_scores {
            let name = bank.module(module_id).map_or(module_id.as_str(), |m| m.name.as_str());
            let _ = writeln!(block, "<module id=\"{module_id}\" name=\"{name}\" score=\"{score:.1}\"/>");
        }
        block.push_str("</modules>\n");
    }

    if !snapshot.patterns.is_empty() {
        block.push_str("<patterns>\n");
        for pattern in &snapshot.patterns {
            let _ = writeln!(
                block,
                "<pattern name=\"{}\" confidence=\"{:.2}\" urgency=\"{:?}\" active=\"{}\">{}</pattern>",
                pattern.name,
                pattern.confidence,
                pattern.urgency,
                pattern.is_active(),
                pattern.display_name,
            );
        }
        block.push_str("</patterns>\n");
    }

    block.push_str("</assessment_analysis>");
    block
}

/// Plain-text narrator used when no external collaborator is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryNarrator;

impl Narrator for SummaryNarrator {
    fn generate_narrative(&self, snapshot: &AnalysisSnapshot) -> Result<String, NarrativeError> {
        let mut text = format!(
            "Overall symptom burden {:.0}/100 ({:?} risk) across {} questions.",
            snapshot.overall_score, snapshot.risk_level, snapshot.questions_asked
        );
        let active: Vec<&str> = snapshot
            .patterns
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.display_name.as_str())
            .collect();
        if active.is_empty() {
            text.push_str(" No symptom pattern reached activation.");
        } else {
            let _ = write!(text, " Active patterns: {}.", active.join(", "));
        }
        if snapshot.under_reporting_risk > 0.5 {
            text.push_str(" Responses suggest possible under-reporting.");
        }
        Ok(text)
    }
}
