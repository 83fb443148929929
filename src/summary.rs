use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::NutritionError;
use crate::nutrition::{DayStatus, DayValidationResult};

time::serde::format_description!(calendar_day, Date, "[year]-[month]-[day]");

/// What gets stored for a finished day. Always rebuilt from a fresh validation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DaySummary {
    #[serde(with = "calendar_day")]
    pub date: Date,
    pub total_calories: u32,
    pub total_protein: u32,
    pub total_carbs: u32,
    pub total_fat: u32,
    pub status: DayStatus,
}

impl DaySummary {
    pub fn from_validation(date: Date, result: &DayValidationResult) -> Self {
        Self {
            date,
            total_calories: result.totals.total_calories,
            total_protein: result.totals.total_protein,
            total_carbs: result.totals.total_carbs,
            total_fat: result.totals.total_fat,
            status: result.status,
        }
    }

    /// Refreshes `existing` in place when there is one, otherwise creates the projection.
    pub fn upsert(existing: Option<DaySummary>, date: Date, result: &DayValidationResult) -> Self {
        match existing {
            Some(mut summary) => {
                summary.total_calories = result.totals.total_calories;
                summary.total_protein = result.totals.total_protein;
                summary.total_carbs = result.totals.total_carbs;
                summary.total_fat = result.totals.total_fat;
                summary.status = result.status;
                summary
            }
            None => Self::from_validation(date, result),
        }
    }
}

impl DayValidationResult {
    /// Closes the day: valid days yield their summary, invalid ones are rejected with
    /// their violations and the compensatory suggestion, if any.
    pub fn finalize(&self, date: Date) -> Result<DaySummary, NutritionError> {
        if !self.is_valid {
            return Err(NutritionError::DayRejected {
                violations: self.violations.clone(),
                suggestion: self.suggestion.clone(),
            });
        }
        Ok(DaySummary::from_validation(date, self))
    }
}
