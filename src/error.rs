use thiserror::Error;

use crate::nutrition::classifier::Violation;
use crate::nutrition::suggestion::CompensatoryMealSuggestion;

#[derive(Debug, Error, PartialEq)]
pub enum NutritionError {
    /// Input rejected at the boundary, before it reaches the engine.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    /// Carries the day's compensatory suggestion so the caller can show how to fix it.
    #[error("day cannot be finalized: {}", join_violations(.violations))]
    DayRejected {
        violations: Vec<Violation>,
        suggestion: Option<CompensatoryMealSuggestion>,
    },
}

impl NutritionError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        NutritionError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<String>>()
        .join("; ")
}
