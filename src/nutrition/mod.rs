pub mod aggregator;
pub mod classifier;
pub mod goals;
pub mod suggestion;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use aggregator::calculate_day_nutrition;
pub use classifier::{calculate_day_status, classify_day, DayClassification, DayStatus, Violation};
pub use goals::{calculate_bmr, calculate_nutritional_goals, calculate_tdee};
pub use suggestion::{generate_compensatory_meal, CompensatoryMealSuggestion, SuggestedFood};
pub use validation::{validate_day, validate_days, DayInput, DayValidationResult};

/// Daily energy (kcal) and macro (g) targets.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct NutritionalGoals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// What was actually eaten over a day, derived from the logged meals.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayNutrition {
    pub total_calories: u32,
    pub total_protein: u32,
    pub total_carbs: u32,
    pub total_fat: u32,
}

/// Nearest integer, halves away from zero. Negative inputs clamp to 0.
pub(crate) fn round_amount(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
