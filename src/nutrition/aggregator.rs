use crate::food::MealEntry;
use crate::nutrition::{round_amount, DayNutrition};

/// Sums every logged item of every meal into the day's totals.
///
/// Food macros are per 100 units, so each item contributes `quantity / 100` times its
/// reference values. Totals are accumulated unrounded and rounded once at the end.
pub fn calculate_day_nutrition(meals: &[MealEntry]) -> DayNutrition {
    let mut calories = 0.0_f64;
    let mut protein = 0.0_f64;
    let mut carbs = 0.0_f64;
    let mut fat = 0.0_f64;

    for item in meals.iter().flat_map(|meal| meal.items.iter()) {
        let factor = item.quantity / 100.0;
        calories += item.food.calories * factor;
        protein += item.food.protein * factor;
        carbs += item.food.carbs * factor;
        fat += item.food.fat * factor;
    }

    DayNutrition {
        total_calories: round_amount(calories),
        total_protein: round_amount(protein),
        total_carbs: round_amount(carbs),
        total_fat: round_amount(fat),
    }
}
