//! The compiled-in symptom-pattern rule table.

use intake_core::models::pattern::{PatternCategory, Urgency};

use crate::catalog::{MarkerCondition, MarkerRule, PatternDefinition};
use crate::modules::{assimilation, communication, defense_repair, energy, structural, transport};

pub const IRON_DEFICIENCY_ANEMIA: &str = "IRON_DEFICIENCY_ANEMIA";
pub const HPA_AXIS_DYSFUNCTION: &str = "HPA_AXIS_DYSFUNCTION";
pub const SLEEP_DEPRIVATION: &str = "SLEEP_DEPRIVATION";
pub const METABOLIC_SYNDROME: &str = "METABOLIC_SYNDROME";
pub const GUT_DYSBIOSIS: &str = "GUT_DYSBIOSIS";
pub const SYSTEMIC_INFLAMMATION: &str = "SYSTEMIC_INFLAMMATION";
pub const THYROID_HYPOFUNCTION: &str = "THYROID_HYPOFUNCTION";

pub fn all_patterns() -> Vec<PatternDefinition> {
    vec![
        PatternDefinition {
            name: IRON_DEFICIENCY_ANEMIA.to_string(),
            display_name: "Iron Deficiency Anemia".to_string(),
            category: PatternCategory::Nutritional,
            urgency: Urgency::Medium,
            required: vec![
                top_tiers("scr_fatigue", 2),
                frequent("nrg_shortness_breath"),
                frequent("scr_cold_extremities"),
            ],
            supporting: vec![frequent("str_restless_legs"), equals("str_brittle_nails", "yes")],
            min_required: 2,
            activation_threshold: None,
            follow_ups: ids(&["trn_pale_skin", "trn_pica"]),
            related_modules: ids(&[transport::ID, energy::ID]),
        },
        PatternDefinition {
            name: HPA_AXIS_DYSFUNCTION.to_string(),
            display_name: "HPA Axis Dysfunction".to_string(),
            category: PatternCategory::Hormonal,
            urgency: Urgency::Medium,
            required: vec![
                top_tiers("scr_stress", 2),
                frequent("nrg_afternoon_crash"),
                frequent("scr_sleep"),
            ],
            supporting: vec![
                any_of("nrg_caffeine", &["two_three", "four_plus"]),
                frequent("com_anxiety"),
            ],
            min_required: 2,
            activation_threshold: None,
            follow_ups: ids(&["nrg_morning_fatigue", "nrg_salt_cravings", "nrg_second_wind"]),
            related_modules: ids(&[energy::ID, communication::ID]),
        },
        PatternDefinition {
            name: SLEEP_DEPRIVATION.to_string(),
            display_name: "Sleep Deprivation".to_string(),
            category: PatternCategory::Sleep,
            urgency: Urgency::Medium,
            required: vec![
                MarkerCondition::new("nrg_sleep_hours", MarkerRule::AtMost(6.0)),
                frequent("scr_sleep"),
            ],
            supporting: vec![
                any_of("nrg_caffeine", &["two_three", "four_plus"]),
                frequent("nrg_waking_night"),
            ],
            min_required: 2,
            activation_threshold: None,
            follow_ups: ids(&["nrg_screen_time", "nrg_weekend_sleep"]),
            related_modules: ids(&[energy::ID]),
        },
        PatternDefinition {
            name: METABOLIC_SYNDROME.to_string(),
            display_name: "Metabolic Syndrome".to_string(),
            category: PatternCategory::Metabolic,
            urgency: Urgency::High,
            required: vec![
                MarkerCondition::new("trn_waist", MarkerRule::AtLeast(38.0)),
                frequent("com_sugar_cravings"),
                frequent("com_thirst"),
            ],
            supporting: vec![
                any_of("trn_blood_pressure", &["elevated", "high"]),
                frequent("nrg_afternoon_crash"),
            ],
            min_required: 2,
            activation_threshold: None,
            follow_ups: ids(&["com_energy_after_meals", "com_family_diabetes"]),
            related_modules: ids(&[transport::ID, communication::ID]),
        },
        PatternDefinition {
            name: GUT_DYSBIOSIS.to_string(),
            display_name: "Gut Dysbiosis".to_string(),
            category: PatternCategory::Digestive,
            urgency: Urgency::Medium,
            required: vec![
                frequent("scr_digestive"),
                frequent("asm_bloating_meals"),
                any_of("asm_bowel_regularity", &["constipated", "loose", "alternating"]),
            ],
            supporting: vec![
                any_of("asm_antibiotics", &["three_five", "more"]),
                any_of("asm_food_reactions", &["dairy", "gluten", "high_fat", "sugar", "legumes"]),
            ],
            min_required: 2,
            activation_threshold: None,
            follow_ups: ids(&["asm_undigested_food", "asm_sugar_cravings", "asm_probiotic_response"]),
            related_modules: ids(&[assimilation::ID, defense_repair::ID]),
        },
        PatternDefinition {
            name: SYSTEMIC_INFLAMMATION.to_string(),
            display_name: "Systemic Inflammation".to_string(),
            category: PatternCategory::Inflammatory,
            urgency: Urgency::High,
            required: vec![top_tiers("scr_pain", 2), frequent("def_joint_swelling")],
            supporting: vec![
                any_of("def_skin_inflammation", &["eczema_psoriasis", "hives"]),
                top_tiers("def_slow_healing", 2),
                frequent("def_allergies"),
            ],
            min_required: 2,
            activation_threshold: Some(0.6),
            follow_ups: ids(&["def_crp_tested", "def_pain_pattern"]),
            related_modules: ids(&[defense_repair::ID, structural::ID]),
        },
        PatternDefinition {
            name: THYROID_HYPOFUNCTION.to_string(),
            display_name: "Thyroid Hypofunction".to_string(),
            category: PatternCategory::Hormonal,
            urgency: Urgency::Medium,
            required: vec![
                top_tiers("com_cold_intolerance", 2),
                top_tiers("scr_fatigue", 2),
                any_of("com_weight_change", &["gained_some", "gained_lot"]),
            ],
            supporting: vec![frequent("str_muscle_cramps")],
            min_required: 2,
            activation_threshold: None,
            follow_ups: ids(&["com_hair_thinning", "com_dry_skin"]),
            related_modules: ids(&[communication::ID]),
        },
    ]
}

fn top_tiers(question_id: &str, tiers: u8) -> MarkerCondition {
    MarkerCondition::new(question_id, MarkerRule::TopTiers(tiers))
}

/// "often" or "daily" on a frequency question.
fn frequent(question_id: &str) -> MarkerCondition {
    any_of(question_id, &["often", "daily"])
}

fn equals(question_id: &str, value: &str) -> MarkerCondition {
    MarkerCondition::new(question_id, MarkerRule::Equals(value.to_string()))
}

fn any_of(question_id: &str, values: &[&str]) -> MarkerCondition {
    MarkerCondition::new(question_id, MarkerRule::AnyOf(ids(values)))
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
