use crate::catalog::ModuleDefinition;
use crate::patterns::IRON_DEFICIENCY_ANEMIA;
use crate::questions::{choice, frequency, number, yes_no};

pub const ID: &str = "TRANSPORT";

/// Circulation and cardiovascular symptoms.
pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Transport".to_string(),
        min_questions: 3,
        max_questions: None,
        emphasis: 1.2,
        questions: vec![
            frequency(
                "trn_numbness",
                ID,
                "How often do you notice numbness or tingling in your hands or feet?",
            ),
            frequency(
                "trn_palpitations",
                ID,
                "How often do you notice a racing or pounding heartbeat?",
            )
            .weighted(1.3)
            .red_flag(),
            frequency(
                "trn_dizziness_standing",
                ID,
                "How often do you feel dizzy when you stand up quickly?",
            ),
            choice(
                "trn_blood_pressure",
                ID,
                "What was your most recent blood pressure reading?",
                &[
                    ("unknown", "I don't know", 0.0),
                    ("normal", "Normal", 0.0),
                    ("low", "Low", 1.0),
                    ("elevated", "Elevated", 1.0),
                    ("high", "High", 2.0),
                ],
            )
            .weighted(1.2),
            number(
                "trn_waist",
                ID,
                "What is your waist measurement in inches?",
                20.0,
                70.0,
            ),
            frequency("trn_swollen_ankles", ID, "How often are your ankles swollen?"),
            yes_no(
                "trn_pale_skin",
                ID,
                "Have you been told you look pale, or noticed pale inner eyelids?",
            )
            .follow_up()
            .confirms(&[IRON_DEFICIENCY_ANEMIA]),
            yes_no(
                "trn_pica",
                ID,
                "Do you crave ice, clay or other non-food items?",
            )
            .follow_up()
            .confirms(&[IRON_DEFICIENCY_ANEMIA]),
        ],
        description: Some("Circulation and cardiovascular function".to_string()),
    }
}
