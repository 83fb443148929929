use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::nutrition::{DayNutrition, NutritionalGoals};

/// Calories above this share of the goal make the day invalid.
pub const MAX_CALORIE_PCT: f64 = 130.0;
/// Protein below this share of the goal makes the day invalid.
pub const MIN_PROTEIN_PCT: f64 = 70.0;
const OVER_GOAL_CALORIE_PCT: f64 = 110.0;
const BALANCED_MIN_CALORIE_PCT: f64 = 90.0;
const BALANCED_MIN_PROTEIN_PCT: f64 = 90.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Balanced,
    UnderGoal,
    OverGoal,
    ExtremeOver,
}

impl DayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DayStatus::Balanced => "balanced",
            DayStatus::UnderGoal => "under_goal",
            DayStatus::OverGoal => "over_goal",
            DayStatus::ExtremeOver => "extreme_over",
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hard rule the day broke. Percentages are already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Calories exceeded the goal by `percent` %.
    CalorieOvershoot { percent: i64 },
    /// Protein reached only `percent` % of the goal.
    ProteinInsufficient { percent: i64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CalorieOvershoot { percent } => write!(
                f,
                "calorie overshoot of {}% (max allowed {}%)",
                percent,
                MAX_CALORIE_PCT as i64 - 100
            ),
            Violation::ProteinInsufficient { percent } => write!(
                f,
                "protein intake insufficient: {}% (min required {}%)",
                percent, MIN_PROTEIN_PCT as i64
            ),
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayClassification {
    pub status: DayStatus,
    pub violations: Vec<Violation>,
    pub is_valid: bool,
}

fn percentages(totals: &DayNutrition, goals: &NutritionalGoals) -> (f64, f64) {
    let calorie_pct = totals.total_calories as f64 / goals.calories as f64 * 100.0;
    let protein_pct = totals.total_protein as f64 / goals.protein as f64 * 100.0;
    (calorie_pct, protein_pct)
}

/// Status label for a day; first matching rule wins.
///
/// Goals must be non-zero, see [`crate::nutrition::validate_day`].
pub fn calculate_day_status(totals: &DayNutrition, goals: &NutritionalGoals) -> DayStatus {
    let (calorie_pct, protein_pct) = percentages(totals, goals);

    if calorie_pct > MAX_CALORIE_PCT {
        return DayStatus::ExtremeOver;
    }
    if protein_pct < MIN_PROTEIN_PCT {
        return DayStatus::UnderGoal;
    }
    if calorie_pct > OVER_GOAL_CALORIE_PCT {
        return DayStatus::OverGoal;
    }
    if (BALANCED_MIN_CALORIE_PCT..=OVER_GOAL_CALORIE_PCT).contains(&calorie_pct)
        && protein_pct >= BALANCED_MIN_PROTEIN_PCT
    {
        return DayStatus::Balanced;
    }
    DayStatus::UnderGoal
}

/// Status plus the hard-rule violations.
///
/// The two hard rules are checked independently of the status precedence, so an
/// `extreme_over` day can also carry the protein violation. Any violation makes the
/// day invalid; every other label (including a soft `under_goal`) stays valid.
pub fn classify_day(totals: &DayNutrition, goals: &NutritionalGoals) -> DayClassification {
    let (calorie_pct, protein_pct) = percentages(totals, goals);
    let mut violations = Vec::new();

    if calorie_pct > MAX_CALORIE_PCT {
        violations.push(Violation::CalorieOvershoot {
            percent: (calorie_pct - 100.0).round() as i64,
        });
    }
    if protein_pct < MIN_PROTEIN_PCT {
        violations.push(Violation::ProteinInsufficient {
            percent: protein_pct.round() as i64,
        });
    }

    DayClassification {
        status: calculate_day_status(totals, goals),
        is_valid: violations.is_empty(),
        violations,
    }
}
