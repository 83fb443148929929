use crate::nutrition::{round_amount, NutritionalGoals};
use crate::profile::{Sex, UserProfile};

// Atwater factors
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// Share of target kcal given to each macro
const PROTEIN_SHARE: f64 = 0.25;
const FAT_SHARE: f64 = 0.25;
const CARBS_SHARE: f64 = 0.50;

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor).
pub fn calculate_bmr(profile: &UserProfile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * profile.age as f64;
    match profile.sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Total daily energy expenditure: BMR scaled by activity level.
pub fn calculate_tdee(profile: &UserProfile) -> f64 {
    calculate_bmr(profile) * profile.activity_level.multiplier()
}

/// Derives the daily targets for a profile.
///
/// The calorie target is the TDEE adjusted for the weight goal. Macros split that
/// (unrounded) target 25% protein, 25% fat, 50% carbs. Each field is rounded on its own,
/// so the macro kcal do not have to add back up to `calories` exactly.
pub fn calculate_nutritional_goals(profile: &UserProfile) -> NutritionalGoals {
    let target_kcal = calculate_tdee(profile) * profile.goal.multiplier();

    NutritionalGoals {
        calories: round_amount(target_kcal),
        protein: round_amount(target_kcal * PROTEIN_SHARE / KCAL_PER_G_PROTEIN),
        carbs: round_amount(target_kcal * CARBS_SHARE / KCAL_PER_G_CARBS),
        fat: round_amount(target_kcal * FAT_SHARE / KCAL_PER_G_FAT),
    }
}
