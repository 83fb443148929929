use serde::{Deserialize, Serialize};

use crate::error::NutritionError;

pub const MIN_AGE: u32 = 16;
pub const MAX_AGE: u32 = 100;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.75,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightGoal {
    Maintenance,
    WeightLoss,
    WeightGain,
}

impl WeightGoal {
    pub fn multiplier(self) -> f64 {
        match self {
            WeightGoal::WeightLoss => 0.8,
            WeightGoal::WeightGain => 1.15,
            WeightGoal::Maintenance => 1.0,
        }
    }
}

/// Body measurements and objectives the daily targets are derived from.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserProfile {
    /// kg
    pub weight: f64,
    /// cm
    pub height: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
}

impl UserProfile {
    /// Range checks applied by callers before handing a profile to the engine.
    pub fn validate(&self) -> Result<(), NutritionError> {
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(NutritionError::validation("weight", "must be a positive number"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(NutritionError::validation("height", "must be a positive number"));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(NutritionError::validation(
                "age",
                format!("must be between {} and {}", MIN_AGE, MAX_AGE),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            weight: 70.0,
            height: 175.0,
            age: 30,
            sex: Sex::Male,
            activity_level: ActivityLevel::Moderate,
            goal: WeightGoal::Maintenance,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let profile = UserProfile { weight: 0.0, ..sample_profile() };
        assert_eq!(
            profile.validate(),
            Err(NutritionError::validation("weight", "must be a positive number"))
        );
    }

    #[test]
    fn test_negative_height_rejected() {
        let profile = UserProfile { height: -170.0, ..sample_profile() };
        assert!(matches!(
            profile.validate(),
            Err(NutritionError::Validation { ref field, .. }) if field == "height"
        ));
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        assert!(UserProfile { age: 16, ..sample_profile() }.validate().is_ok());
        assert!(UserProfile { age: 100, ..sample_profile() }.validate().is_ok());
        assert!(UserProfile { age: 15, ..sample_profile() }.validate().is_err());
        assert!(UserProfile { age: 101, ..sample_profile() }.validate().is_err());
    }

    #[test]
    fn test_profile_deserializes_snake_case_enums() {
        let json = r#"{
            "weight": 62.5,
            "height": 168,
            "age": 41,
            "sex": "female",
            "activity_level": "sedentary",
            "goal": "weight_loss"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sex, Sex::Female);
        assert_eq!(profile.activity_level, ActivityLevel::Sedentary);
        assert_eq!(profile.goal, WeightGoal::WeightLoss);
        assert_eq!(profile.height, 168.0);
    }

    #[test]
    fn test_unknown_enum_value_fails_to_parse() {
        let json = r#"{"weight":70,"height":175,"age":30,"sex":"male","activity_level":"extreme","goal":"maintenance"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
    }
}
