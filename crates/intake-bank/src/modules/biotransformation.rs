use crate::catalog::ModuleDefinition;
use crate::questions::{likert, multi_select, yes_no};

pub const ID: &str = "BIOTRANSFORMATION";

pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Biotransformation".to_string(),
        min_questions: 3,
        max_questions: None,
        emphasis: 0.9,
        questions: vec![
            likert(
                "bio_alcohol_tolerance",
                ID,
                "How strongly does a small amount of alcohol affect you?",
            ),
            likert(
                "bio_caffeine_sensitivity",
                ID,
                "How jittery or wired does a single coffee make you?",
            ),
            multi_select(
                "bio_chemical_exposure",
                ID,
                "Which of these exposures apply to you at home or work?",
                &[
                    ("none", "None", 0.0),
                    ("heavy_traffic", "Heavy traffic or exhaust", 1.0),
                    ("mold", "Mold or damp buildings", 2.0),
                    ("solvents", "Solvents, paints or cleaning chemicals", 2.0),
                    ("pesticides", "Pesticides", 2.0),
                ],
            ),
            yes_no(
                "bio_medication_reactions",
                ID,
                "Do standard medication doses often give you side effects?",
            ),
        ],
        description: Some("Detoxification and chemical sensitivity".to_string()),
    }
}
