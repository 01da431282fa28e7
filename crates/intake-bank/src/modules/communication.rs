use intake_core::models::question::{Condition, Sex};

use crate::catalog::ModuleDefinition;
use crate::patterns::{METABOLIC_SYNDROME, THYROID_HYPOFUNCTION};
use crate::questions::{choice, frequency, likert, yes_no};

pub const ID: &str = "COMMUNICATION";

/// Hormonal and neurological signalling.
pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Communication".to_string(),
        min_questions: 4,
        max_questions: None,
        emphasis: 1.2,
        questions: vec![
            likert("com_mood_swings", ID, "How much do mood swings affect you?"),
            frequency("com_anxiety", ID, "How often do you feel anxious or on edge?"),
            choice(
                "com_weight_change",
                ID,
                "How has your weight changed over the past year without trying?",
                &[
                    ("stable", "It has stayed about the same", 0.0),
                    ("gained_some", "Gained a little", 1.0),
                    ("lost_some", "Lost a little", 1.0),
                    ("gained_lot", "Gained a lot", 2.0),
                    ("lost_lot", "Lost a lot", 2.0),
                ],
            )
            .red_flag(),
            likert(
                "com_cold_intolerance",
                ID,
                "How much more sensitive to cold are you than the people around you?",
            ),
            frequency("com_sugar_cravings", ID, "How often do you crave sweets between meals?"),
            frequency("com_thirst", ID, "How often are you unusually thirsty?"),
            choice(
                "com_menstrual_status",
                ID,
                "Which best describes your menstrual cycle?",
                &[
                    ("regular", "Regular", 0.0),
                    ("irregular", "Irregular", 1.0),
                    ("painful", "Regular but painful", 2.0),
                    ("postmenopausal", "Post-menopausal", 0.0),
                    ("none", "No periods for another reason", 1.0),
                ],
            )
            .with_skip("postmenopausal", &["com_heavy_bleeding"])
            .only_for(Sex::Female),
            likert("com_heavy_bleeding", ID, "How heavy is your menstrual bleeding?")
                .only_for(Sex::Female)
                .requires("com_menstrual_status", Condition::NotEquals("none".to_string())),
            yes_no(
                "com_hair_thinning",
                ID,
                "Have you noticed thinning hair or thinning of the outer eyebrows?",
            )
            .follow_up()
            .confirms(&[THYROID_HYPOFUNCTION]),
            likert("com_dry_skin", ID, "How dry is your skin?")
                .follow_up()
                .confirms(&[THYROID_HYPOFUNCTION]),
            frequency(
                "com_energy_after_meals",
                ID,
                "How often do you feel sleepy after meals?",
            )
            .follow_up()
            .confirms(&[METABOLIC_SYNDROME]),
            yes_no(
                "com_family_diabetes",
                ID,
                "Does type 2 diabetes run in your family?",
            )
            .follow_up()
            .confirms(&[METABOLIC_SYNDROME]),
        ],
        description: Some("Hormonal and neurological signalling".to_string()),
    }
}
