use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CompensatoryFood;
use crate::error::NutritionError;
use crate::food::MealEntry;
use crate::nutrition::{
    calculate_day_nutrition, calculate_nutritional_goals, classify_day,
    generate_compensatory_meal, CompensatoryMealSuggestion, DayNutrition, DayStatus,
    NutritionalGoals, Violation,
};
use crate::profile::UserProfile;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayValidationResult {
    pub is_valid: bool,
    pub status: DayStatus,
    pub totals: DayNutrition,
    pub goals: NutritionalGoals,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<CompensatoryMealSuggestion>,
}

/// One day to judge: who ate it and what was eaten.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayInput {
    pub profile: UserProfile,
    pub meals: Vec<MealEntry>,
}

/// Judges one day of meals against the profile's goals.
///
/// A suggestion is only computed for invalid days and `under_goal` days. Zero calorie or
/// protein goals are reported as a configuration error since the percentages would be
/// meaningless.
pub fn validate_day(
    profile: &UserProfile,
    meals: &[MealEntry],
    catalog: &[CompensatoryFood],
) -> Result<DayValidationResult, NutritionError> {
    let goals = calculate_nutritional_goals(profile);
    if goals.calories == 0 || goals.protein == 0 {
        return Err(NutritionError::Configuration(format!(
            "derived goals have a zero denominator (calories: {}, protein: {})",
            goals.calories, goals.protein
        )));
    }

    let totals = calculate_day_nutrition(meals);
    let classification = classify_day(&totals, &goals);

    let suggestion = if !classification.is_valid || classification.status == DayStatus::UnderGoal {
        generate_compensatory_meal(&totals, &goals, catalog)
    } else {
        None
    };

    debug!(
        status = %classification.status,
        is_valid = classification.is_valid,
        violations = classification.violations.len(),
        suggested = suggestion.is_some(),
        "day validated"
    );

    Ok(DayValidationResult {
        is_valid: classification.is_valid,
        status: classification.status,
        totals,
        goals,
        violations: classification.violations,
        suggestion,
    })
}

/// Validates independent days in parallel; results come back in input order.
pub fn validate_days(
    days: &[DayInput],
    catalog: &[CompensatoryFood],
) -> Vec<Result<DayValidationResult, NutritionError>> {
    days.par_iter()
        .map(|day| validate_day(&day.profile, &day.meals, catalog))
        .collect()
}
