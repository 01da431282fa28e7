use crate::catalog::ModuleDefinition;
use crate::patterns::SYSTEMIC_INFLAMMATION;
use crate::questions::{choice, frequency, likert, multi_select, yes_no};

pub const ID: &str = "DEFENSE_REPAIR";

pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Defense & Repair".to_string(),
        min_questions: 3,
        max_questions: None,
        emphasis: 1.1,
        questions: vec![
            likert("def_slow_healing", ID, "How slowly do cuts and bruises heal?"),
            frequency(
                "def_allergies",
                ID,
                "How often do seasonal or environmental allergies flare up?",
            ),
            frequency(
                "def_joint_swelling",
                ID,
                "How often do your joints feel swollen or stiff in the morning?",
            )
            .weighted(1.3),
            choice(
                "def_skin_inflammation",
                ID,
                "Do you have ongoing skin problems?",
                &[
                    ("none", "No", 0.0),
                    ("occasional", "Occasional rashes or breakouts", 1.0),
                    ("eczema_psoriasis", "Eczema or psoriasis", 2.0),
                    ("hives", "Recurring hives", 2.0),
                ],
            ),
            likert(
                "def_recovery",
                ID,
                "How long does it take you to recover from a cold or minor illness?",
            ),
            yes_no(
                "def_crp_tested",
                ID,
                "Has blood work ever shown raised inflammation markers such as CRP?",
            )
            .follow_up()
            .confirms(&[SYSTEMIC_INFLAMMATION]),
            multi_select(
                "def_pain_pattern",
                ID,
                "Where do you feel aches most often?",
                &[
                    ("joints", "Joints", 1.0),
                    ("muscles", "Muscles", 1.0),
                    ("back", "Back", 1.0),
                    ("head", "Head", 1.0),
                ],
            )
            .follow_up()
            .confirms(&[SYSTEMIC_INFLAMMATION]),
        ],
        description: Some("Immune resilience, inflammation and tissue repair".to_string()),
    }
}
