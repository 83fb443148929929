use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::NutritionError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[serde(alias = "grams")]
    G,
    #[serde(alias = "milliliters")]
    Ml,
    #[serde(alias = "pièce")]
    Piece,
}

impl std::str::FromStr for Unit {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "grams" => Ok(Unit::G),
            "ml" | "milliliters" => Ok(Unit::Ml),
            "piece" | "pièce" => Ok(Unit::Piece),
            other => Err(NutritionError::validation("unit", format!("unknown unit '{}'", other))),
        }
    }
}

/// A food with its macros expressed per 100 units of `unit`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FoodReference {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub unit: Unit,
}

impl FoodReference {
    pub fn validate(&self) -> Result<(), NutritionError> {
        if self.name.trim().is_empty() {
            return Err(NutritionError::validation("name", "food name must not be empty"));
        }
        // Per-100 values only make sense for measurable units.
        if self.unit == Unit::Piece {
            return Err(NutritionError::validation(
                "unit",
                format!("'{}' must be measured in g or ml", self.name),
            ));
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(NutritionError::validation(
                    field,
                    format!("'{}' must be a non-negative number", self.name),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealItem {
    pub food: FoodReference,
    /// Amount eaten, in the food's own unit.
    pub quantity: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealEntry {
    /// Free-form label: breakfast, lunch, snack...
    #[serde(rename = "type")]
    pub meal_type: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub items: Vec<MealItem>,
}

impl MealEntry {
    pub fn validate(&self) -> Result<(), NutritionError> {
        for item in &self.items {
            item.food.validate()?;
            if !(item.quantity.is_finite() && item.quantity > 0.0) {
                return Err(NutritionError::validation(
                    "quantity",
                    format!("quantity of '{}' must be greater than 0", item.food.name),
                ));
            }
        }
        Ok(())
    }
}

/// Meals logged on `date`, judged in each timestamp's own offset. Order is preserved.
pub fn meals_for_day(meals: &[MealEntry], date: Date) -> Vec<MealEntry> {
    meals
        .iter()
        .filter(|meal| meal.timestamp.date() == date)
        .cloned()
        .collect()
}
