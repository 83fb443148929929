use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::NutritionError;
use crate::food::{FoodReference, Unit};

// Expected column headers
const NAME_COL: &str = "name";
const CALORIES_COL: &str = "calories";
const PROTEIN_COL: &str = "protein";
const CARBS_COL: &str = "carbs";
const FAT_COL: &str = "fat";
const UNIT_COL: &str = "unit";
const BASE_QUANTITY_COL: &str = "base_quantity";

pub const SEARCH_LIMIT: usize = 20;

/// A catalog entry for compensatory meals. Macros are per `base_quantity` of `unit`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompensatoryFood {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub unit: Unit,
    pub base_quantity: f64,
}

impl CompensatoryFood {
    fn new(
        name: &str,
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
        unit: Unit,
        base_quantity: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            calories,
            protein,
            carbs,
            fat,
            unit,
            base_quantity,
        }
    }
}

/// The built-in compensatory catalog. Its order is part of the contract: the suggestion
/// engine always takes the first qualifying entry.
pub fn default_compensatory_catalog() -> Vec<CompensatoryFood> {
    vec![
        CompensatoryFood::new("Whole egg", 155.0, 13.0, 1.0, 11.0, Unit::Piece, 1.0),
        CompensatoryFood::new("Greek yogurt 0%", 59.0, 10.0, 4.0, 0.2, Unit::G, 100.0),
        CompensatoryFood::new("Chicken breast", 165.0, 31.0, 0.0, 3.6, Unit::G, 100.0),
        CompensatoryFood::new("Almonds", 579.0, 21.0, 22.0, 50.0, Unit::G, 30.0),
        CompensatoryFood::new("Cottage cheese", 98.0, 11.0, 3.4, 4.3, Unit::G, 100.0),
        CompensatoryFood::new("Canned tuna", 116.0, 26.0, 0.0, 1.0, Unit::G, 100.0),
        CompensatoryFood::new("Fat-free fromage blanc", 45.0, 8.0, 4.0, 0.2, Unit::G, 100.0),
        CompensatoryFood::new("Walnuts", 618.0, 15.0, 14.0, 59.0, Unit::G, 30.0),
        CompensatoryFood::new("Cooked lentils", 116.0, 9.0, 20.0, 0.4, Unit::G, 100.0),
        CompensatoryFood::new("Cooked quinoa", 120.0, 4.4, 22.0, 1.9, Unit::G, 100.0),
    ]
}

/// Everyday reference foods, per 100 g or 100 ml.
pub fn basic_foods() -> Vec<FoodReference> {
    let food = |name: &str, calories, protein, carbs, fat, unit| FoodReference {
        name: name.to_string(),
        calories,
        protein,
        carbs,
        fat,
        unit,
    };
    vec![
        food("Cooked white rice", 130.0, 2.7, 28.0, 0.3, Unit::G),
        food("Chicken breast", 165.0, 31.0, 0.0, 3.6, Unit::G),
        food("Whole egg", 155.0, 13.0, 1.1, 11.0, Unit::G),
        food("Broccoli", 34.0, 2.8, 7.0, 0.4, Unit::G),
        food("Banana", 89.0, 1.1, 23.0, 0.3, Unit::G),
        food("Oat flakes", 389.0, 16.9, 66.0, 6.9, Unit::G),
        food("Salmon", 208.0, 22.0, 0.0, 13.0, Unit::G),
        food("Almonds", 579.0, 21.0, 22.0, 50.0, Unit::G),
        food("Plain greek yogurt", 59.0, 10.0, 4.0, 0.4, Unit::G),
        food("Spinach", 23.0, 2.9, 3.6, 0.4, Unit::G),
        food("Wholemeal bread", 247.0, 13.0, 41.0, 4.2, Unit::G),
        food("Cooked lentils", 116.0, 9.0, 20.0, 0.4, Unit::G),
        food("Olive oil", 884.0, 0.0, 0.0, 100.0, Unit::Ml),
        food("Fat-free fromage blanc", 45.0, 8.0, 4.0, 0.2, Unit::G),
        food("Cooked quinoa", 120.0, 4.4, 22.0, 1.9, Unit::G),
    ]
}

/// Rejects catalogs the suggestion engine cannot work with.
pub fn validate_catalog(catalog: &[CompensatoryFood]) -> Result<(), NutritionError> {
    if catalog.is_empty() {
        return Err(NutritionError::Configuration(
            "compensatory catalog is empty".to_string(),
        ));
    }
    for food in catalog {
        if food.name.trim().is_empty() {
            return Err(NutritionError::Configuration(
                "compensatory catalog entry without a name".to_string(),
            ));
        }
        if !(food.base_quantity.is_finite() && food.base_quantity > 0.0) {
            return Err(NutritionError::Configuration(format!(
                "base quantity of '{}' must be greater than 0",
                food.name
            )));
        }
        let macros = [food.calories, food.protein, food.carbs, food.fat];
        if macros.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
            return Err(NutritionError::Configuration(format!(
                "macros of '{}' must be non-negative numbers",
                food.name
            )));
        }
    }
    Ok(())
}

/// Case-insensitive name search, sorted by name, at most [`SEARCH_LIMIT`] hits.
/// The query is trimmed before matching; a blank query matches nothing.
pub fn search_foods<'a>(foods: &'a [FoodReference], query: &str) -> Vec<&'a FoodReference> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<&FoodReference> = foods
        .iter()
        .filter(|food| food.name.to_lowercase().contains(&needle))
        .collect();
    hits.sort_by(|a, b| a.name.cmp(&b.name));
    hits.truncate(SEARCH_LIMIT);
    hits
}

fn column_index(headers: &StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| anyhow::anyhow!("Column '{}' not found", column))
}

fn parse_number(record: &StringRecord, idx: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>()
        .with_context(|| format!("Invalid {} '{}' at row {}", column, raw, row))
}

fn parse_unit(record: &StringRecord, idx: usize, row: usize) -> Result<Unit> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse::<Unit>()
        .with_context(|| format!("Invalid unit '{}' at row {}", raw.trim(), row))
}

struct MacroColumns {
    name: usize,
    calories: usize,
    protein: usize,
    carbs: usize,
    fat: usize,
    unit: usize,
}

impl MacroColumns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            name: column_index(headers, NAME_COL)?,
            calories: column_index(headers, CALORIES_COL)?,
            protein: column_index(headers, PROTEIN_COL)?,
            carbs: column_index(headers, CARBS_COL)?,
            fat: column_index(headers, FAT_COL)?,
            unit: column_index(headers, UNIT_COL)?,
        })
    }

    fn read(&self, record: &StringRecord, row: usize) -> Result<Option<FoodReference>> {
        let name = record.get(self.name).unwrap_or("").trim().to_string();
        if name.is_empty() {
            warn!(row, "skipping row without a food name");
            return Ok(None);
        }
        Ok(Some(FoodReference {
            name,
            calories: parse_number(record, self.calories, CALORIES_COL, row)?,
            protein: parse_number(record, self.protein, PROTEIN_COL, row)?,
            carbs: parse_number(record, self.carbs, CARBS_COL, row)?,
            fat: parse_number(record, self.fat, FAT_COL, row)?,
            unit: parse_unit(record, self.unit, row)?,
        }))
    }
}

fn open_csv(csv_path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("CSV file not found at: {:?}", csv_path));
    }
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file at {:?}", csv_path))?;
    Ok(ReaderBuilder::new().has_headers(true).from_reader(file))
}

/// Loads a compensatory catalog, keeping file order.
pub fn load_compensatory_catalog(csv_path: &Path) -> Result<Vec<CompensatoryFood>> {
    let mut rdr = open_csv(csv_path)?;
    let headers = rdr.headers()?.clone();
    let columns = MacroColumns::locate(&headers)?;
    let base_idx = column_index(&headers, BASE_QUANTITY_COL)?;

    let mut catalog = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let Some(food) = columns.read(&record, row_index)? else {
            continue;
        };
        catalog.push(CompensatoryFood {
            base_quantity: parse_number(&record, base_idx, BASE_QUANTITY_COL, row_index)?,
            name: food.name,
            calories: food.calories,
            protein: food.protein,
            carbs: food.carbs,
            fat: food.fat,
            unit: food.unit,
        });
    }

    validate_catalog(&catalog)
        .with_context(|| format!("Unusable compensatory catalog in {:?}", csv_path))?;
    debug!(entries = catalog.len(), path = ?csv_path, "loaded compensatory catalog");
    Ok(catalog)
}

/// Loads reference foods (macros per 100 units).
pub fn load_food_references(csv_path: &Path) -> Result<Vec<FoodReference>> {
    let mut rdr = open_csv(csv_path)?;
    let headers = rdr.headers()?.clone();
    let columns = MacroColumns::locate(&headers)?;

    let mut foods = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        if let Some(food) = columns.read(&record, row_index)? {
            food.validate()
                .with_context(|| format!("Invalid food at row {}", row_index))?;
            foods.push(food);
        }
    }

    if foods.is_empty() {
        return Err(anyhow::anyhow!("No valid foods loaded from {:?}", csv_path));
    }
    debug!(entries = foods.len(), path = ?csv_path, "loaded reference foods");
    Ok(foods)
}
