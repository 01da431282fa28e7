use intake_core::models::question::Condition;

use super::{
    assimilation, biotransformation, communication, defense_repair, energy, structural, transport,
};
use crate::catalog::ModuleDefinition;
use crate::questions::{choice, free_text, frequency, likert, yes_no};

pub const ID: &str = "SCREENING";

/// Broad first pass. Answers here elevate the body-system modules that
/// deserve a closer look.
pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Screening".to_string(),
        min_questions: 6,
        max_questions: None,
        emphasis: 1.0,
        questions: vec![
            likert(
                "scr_fatigue",
                ID,
                "How much does fatigue limit your daily activities?",
            )
            .weighted(1.5)
            .elevates(energy::ID, Condition::AtLeast(4.0)),
            frequency(
                "scr_digestive",
                ID,
                "How often do you experience bloating, gas or abdominal discomfort?",
            )
            .weighted(1.4)
            .elevates(assimilation::ID, often()),
            frequency("scr_sleep", ID, "How often do you wake up feeling unrefreshed?")
                .weighted(1.3)
                .elevates(energy::ID, often()),
            likert(
                "scr_stress",
                ID,
                "How overwhelmed by stress have you felt over the past month?",
            )
            .weighted(1.2)
            .elevates(communication::ID, Condition::AtLeast(4.0)),
            likert("scr_pain", ID, "How much do joint or muscle aches bother you?")
                .elevates(structural::ID, Condition::AtLeast(4.0)),
            choice(
                "scr_infections",
                ID,
                "How many colds or infections have you had in the past year?",
                &[
                    ("0_1", "None or one", 0.0),
                    ("2_3", "Two or three", 1.0),
                    ("4_5", "Four or five", 2.0),
                    ("6_plus", "Six or more", 3.0),
                ],
            )
            .elevates(
                defense_repair::ID,
                Condition::AnyOf(vec!["4_5".to_string(), "6_plus".to_string()]),
            ),
            yes_no(
                "scr_chemical_sensitivity",
                ID,
                "Do strong smells, perfumes or alcohol affect you more than most people?",
            )
            .elevates(biotransformation::ID, Condition::Equals("yes".to_string())),
            frequency("scr_cold_extremities", ID, "How often are your hands or feet cold?")
                .elevates(transport::ID, often()),
            free_text(
                "scr_concerns",
                ID,
                "What health concerns matter most to you right now?",
            ),
        ],
        description: Some("General symptom survey across every body system".to_string()),
    }
}

fn often() -> Condition {
    Condition::AnyOf(vec!["often".to_string(), "daily".to_string()])
}
