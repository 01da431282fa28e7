use crate::catalog::ModuleDefinition;
use crate::patterns::{HPA_AXIS_DYSFUNCTION, SLEEP_DEPRIVATION};
use crate::questions::{choice, frequency, likert, number, yes_no};

pub const ID: &str = "ENERGY";

/// Energy production, stress response and sleep.
pub fn module() -> ModuleDefinition {
    ModuleDefinition {
        id: ID.to_string(),
        name: "Energy".to_string(),
        min_questions: 4,
        max_questions: None,
        emphasis: 1.3,
        questions: vec![
            frequency(
                "nrg_afternoon_crash",
                ID,
                "How often do you hit an energy crash in the afternoon?",
            )
            .weighted(1.2),
            likert(
                "nrg_exercise_tolerance",
                ID,
                "How drained do you feel after light exercise?",
            ),
            number(
                "nrg_sleep_hours",
                ID,
                "On average, how many hours do you sleep per night?",
                0.0,
                14.0,
            )
            .higher_is_better()
            .weighted(1.2),
            choice(
                "nrg_caffeine",
                ID,
                "How many caffeinated drinks do you need to get through the day?",
                &[
                    ("none", "None", 0.0),
                    ("one", "One", 1.0),
                    ("two_three", "Two or three", 2.0),
                    ("four_plus", "Four or more", 3.0),
                ],
            ),
            frequency(
                "nrg_waking_night",
                ID,
                "How often do you wake at night and struggle to fall back asleep?",
            ),
            frequency(
                "nrg_shortness_breath",
                ID,
                "How often do you get short of breath with mild exertion?",
            )
            .red_flag(),
            likert(
                "nrg_morning_fatigue",
                ID,
                "How hard is it to get going in the morning, even after a full night's sleep?",
            )
            .follow_up()
            .confirms(&[HPA_AXIS_DYSFUNCTION]),
            frequency("nrg_salt_cravings", ID, "How often do you crave salty foods?")
                .follow_up()
                .confirms(&[HPA_AXIS_DYSFUNCTION]),
            yes_no(
                "nrg_second_wind",
                ID,
                "Do you get a burst of energy late in the evening?",
            )
            .follow_up()
            .confirms(&[HPA_AXIS_DYSFUNCTION]),
            choice(
                "nrg_screen_time",
                ID,
                "How long before bed do you put screens away?",
                &[
                    ("two_hours", "Two hours or more", 0.0),
                    ("one_hour", "About an hour", 1.0),
                    ("thirty_minutes", "Half an hour", 2.0),
                    ("in_bed", "I use screens in bed", 3.0),
                ],
            )
            .follow_up()
            .confirms(&[SLEEP_DEPRIVATION]),
            yes_no(
                "nrg_weekend_sleep",
                ID,
                "Do you sleep much longer on days off?",
            )
            .follow_up()
            .confirms(&[SLEEP_DEPRIVATION]),
        ],
        description: Some("Energy, stress response and sleep".to_string()),
    }
}
