use crate::catalog::ModuleDefinition;
use crate::patterns::SYSTEMIC_INFLAMMATION;
use crate::questions::{frequency, likert, yes_no};

pub const ID: &str = "STRUCTURAL";

pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Structural Integrity".to_string(),
        min_questions: 3,
        max_questions: None,
        emphasis: 0.8,
        questions: vec![
            likert("str_joint_pain", ID, "How much joint pain do you have?"),
            frequency("str_muscle_cramps", ID, "How often do you get muscle cramps?"),
            likert(
                "str_back_neck",
                ID,
                "How much does back or neck discomfort limit you?",
            ),
            frequency(
                "str_restless_legs",
                ID,
                "How often do your legs feel restless at night?",
            ),
            yes_no("str_brittle_nails", ID, "Are your nails brittle or ridged?"),
            // Only worth asking once inflammation is suspected.
            likert(
                "str_morning_stiffness",
                ID,
                "How long does morning stiffness last before you loosen up?",
            )
            .confirms(&[SYSTEMIC_INFLAMMATION]),
        ],
        description: Some("Musculoskeletal system and connective tissue".to_string()),
    }
}
