use serde::Serialize;

use crate::catalog::CompensatoryFood;
use crate::food::Unit;
use crate::nutrition::{round_amount, DayNutrition, NutritionalGoals};

pub const SUGGESTION_NAME: &str = "Suggested compensatory meal";

// Below both of these there is nothing worth compensating.
const MIN_PROTEIN_DEFICIT: f64 = 10.0;
const MIN_CALORIE_DEFICIT: f64 = 200.0;

// Phase 1: one lean protein source.
const PROTEIN_PRIORITY_DEFICIT: f64 = 15.0;
const LEAN_MIN_PROTEIN: f64 = 20.0;
const LEAN_MAX_CALORIES: f64 = 200.0;
const MAX_PORTION: f64 = 200.0;

// Phase 2: balanced fill.
const FILL_PROTEIN_THRESHOLD: f64 = 5.0;
const FILL_CALORIE_THRESHOLD: f64 = 100.0;
const FILL_STOP_CALORIES: f64 = 50.0;
const BALANCED_MIN_PROTEIN: f64 = 8.0;
const BALANCED_MAX_PROTEIN: f64 = 15.0;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SuggestedFood {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CompensatoryMealSuggestion {
    pub name: String,
    pub items: Vec<SuggestedFood>,
    pub total_calories: u32,
    pub total_protein: u32,
    pub total_carbs: u32,
    pub total_fat: u32,
}

struct Selection<'a> {
    food: &'a CompensatoryFood,
    quantity: f64,
}

impl Selection<'_> {
    fn factor(&self) -> f64 {
        self.quantity / self.food.base_quantity
    }
}

fn is_lean_protein(food: &CompensatoryFood) -> bool {
    food.protein > LEAN_MIN_PROTEIN && food.calories < LEAN_MAX_CALORIES
}

fn is_balanced(food: &CompensatoryFood) -> bool {
    food.protein > BALANCED_MIN_PROTEIN && food.protein < BALANCED_MAX_PROTEIN
}

/// Proposes catalog portions that close the day's protein/calorie gap.
///
/// Catalog order decides everything: phase 1 takes the first lean protein source, phase 2
/// walks the balanced entries in order, adding each at its base quantity until the stop
/// check (run before each add) says the gap is closed. The last balanced entry added can
/// overshoot the gap.
///
/// Returns `None` only when there is no meaningful deficit. A catalog with nothing that
/// qualifies still yields a suggestion, with no items and zero totals.
pub fn generate_compensatory_meal(
    totals: &DayNutrition,
    goals: &NutritionalGoals,
    catalog: &[CompensatoryFood],
) -> Option<CompensatoryMealSuggestion> {
    let protein_deficit = (goals.protein as f64 - totals.total_protein as f64).max(0.0);
    let calorie_deficit = (goals.calories as f64 - totals.total_calories as f64).max(0.0);

    if protein_deficit < MIN_PROTEIN_DEFICIT && calorie_deficit < MIN_CALORIE_DEFICIT {
        return None;
    }

    let mut selected: Vec<Selection<'_>> = Vec::new();
    let mut remaining_protein = protein_deficit;
    let mut remaining_calories = calorie_deficit;

    if protein_deficit > PROTEIN_PRIORITY_DEFICIT {
        if let Some(food) = catalog.iter().find(|f| is_lean_protein(f)) {
            let quantity =
                ((remaining_protein / food.protein).ceil() * food.base_quantity).min(MAX_PORTION);
            let pick = Selection { food, quantity };
            remaining_protein -= food.protein * pick.factor();
            remaining_calories -= food.calories * pick.factor();
            selected.push(pick);
        }
    }

    if remaining_protein > FILL_PROTEIN_THRESHOLD || remaining_calories > FILL_CALORIE_THRESHOLD {
        for food in catalog.iter().filter(|f| is_balanced(f)) {
            if remaining_protein <= 0.0 && remaining_calories <= FILL_STOP_CALORIES {
                break;
            }
            selected.push(Selection { food, quantity: food.base_quantity });
            remaining_protein -= food.protein;
            remaining_calories -= food.calories;
        }
    }

    Some(build_suggestion(&selected))
}

fn build_suggestion(selected: &[Selection<'_>]) -> CompensatoryMealSuggestion {
    let mut total_calories = 0.0;
    let mut total_protein = 0.0;
    let mut total_carbs = 0.0;
    let mut total_fat = 0.0;

    let items = selected
        .iter()
        .map(|pick| {
            let factor = pick.factor();
            let food = pick.food;
            total_calories += food.calories * factor;
            total_protein += food.protein * factor;
            total_carbs += food.carbs * factor;
            total_fat += food.fat * factor;

            SuggestedFood {
                name: food.name.clone(),
                quantity: pick.quantity,
                unit: food.unit,
                calories: round_amount(food.calories * factor),
                protein: round_amount(food.protein * factor),
                carbs: round_amount(food.carbs * factor),
                fat: round_amount(food.fat * factor),
            }
        })
        .collect();

    CompensatoryMealSuggestion {
        name: SUGGESTION_NAME.to_string(),
        items,
        total_calories: round_amount(total_calories),
        total_protein: round_amount(total_protein),
        total_carbs: round_amount(total_carbs),
        total_fat: round_amount(total_fat),
    }
}
