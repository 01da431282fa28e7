use crate::catalog::ModuleDefinition;
use crate::patterns::GUT_DYSBIOSIS;
use crate::questions::{choice, frequency, likert, multi_select};

pub const ID: &str = "ASSIMILATION";

/// Digestion, absorption and the gut microbiome.
pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Assimilation".to_string(),
        min_questions: 4,
        max_questions: None,
        emphasis: 1.4,
        questions: vec![
            frequency("asm_bloating_meals", ID, "How often do you feel bloated after meals?")
                .weighted(1.3),
            choice(
                "asm_bowel_regularity",
                ID,
                "Which best describes your bowel movements?",
                &[
                    ("regular", "Daily and well formed", 0.0),
                    ("variable", "Mostly regular with occasional changes", 1.0),
                    ("constipated", "Fewer than three per week", 2.0),
                    ("loose", "Frequently loose", 2.0),
                    ("alternating", "Alternating between constipated and loose", 3.0),
                ],
            )
            .weighted(1.2),
            frequency("asm_heartburn", ID, "How often do you get heartburn or reflux?"),
            multi_select(
                "asm_food_reactions",
                ID,
                "Which foods seem to make your symptoms worse?",
                &[
                    ("none", "None that I have noticed", 0.0),
                    ("dairy", "Dairy", 1.0),
                    ("gluten", "Wheat or gluten", 1.0),
                    ("high_fat", "Fatty or fried food", 1.0),
                    ("sugar", "Sugar", 1.0),
                    ("legumes", "Beans and legumes", 1.0),
                ],
            )
            .with_skip("none", &["asm_reaction_timing"]),
            choice(
                "asm_reaction_timing",
                ID,
                "How soon after eating do those reactions start?",
                &[
                    ("next_day", "The next day", 1.0),
                    ("few_hours", "Within a few hours", 1.0),
                    ("within_hour", "Within the hour", 2.0),
                ],
            ),
            choice(
                "asm_antibiotics",
                ID,
                "How many courses of antibiotics have you taken in the past five years?",
                &[
                    ("none", "None", 0.0),
                    ("one_two", "One or two", 1.0),
                    ("three_five", "Three to five", 2.0),
                    ("more", "More than five", 3.0),
                ],
            ),
            frequency(
                "asm_undigested_food",
                ID,
                "How often do you notice undigested food in your stool?",
            )
            .follow_up()
            .confirms(&[GUT_DYSBIOSIS]),
            likert(
                "asm_sugar_cravings",
                ID,
                "How strong are your cravings for sugar or refined carbohydrates?",
            )
            .follow_up()
            .confirms(&[GUT_DYSBIOSIS]),
            choice(
                "asm_probiotic_response",
                ID,
                "How did your digestion respond the last time you took probiotics?",
                &[
                    ("better", "It improved", 0.0),
                    ("not_tried", "I have not tried them", 1.0),
                    ("no_change", "No change", 1.0),
                    ("worse", "It got worse", 2.0),
                ],
            )
            .follow_up()
            .confirms(&[GUT_DYSBIOSIS]),
        ],
        description: Some("Digestion, absorption and gut health".to_string()),
    }
}
