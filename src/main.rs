use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use nutri_day::catalog::{
    basic_foods, default_compensatory_catalog, load_compensatory_catalog, load_food_references,
    search_foods, CompensatoryFood,
};
use nutri_day::cli::{parse_args, Command};
use nutri_day::config::AppConfig;
use nutri_day::food::{meals_for_day, MealEntry};
use nutri_day::logging;
use nutri_day::nutrition::{calculate_nutritional_goals, validate_day, validate_days, DayInput};
use nutri_day::profile::UserProfile;
use nutri_day::NutritionError;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file '{}'", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in '{}'", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn read_profile(path: &Path) -> Result<UserProfile> {
    let profile: UserProfile = read_json(path).await?;
    profile
        .validate()
        .with_context(|| format!("Rejected profile in '{}'", path.display()))?;
    Ok(profile)
}

fn check_meals(meals: &[MealEntry]) -> Result<()> {
    for (idx, meal) in meals.iter().enumerate() {
        meal.validate()
            .with_context(|| format!("Rejected meal #{} ('{}')", idx, meal.meal_type))?;
    }
    Ok(())
}

fn resolve_catalog(flag: Option<PathBuf>, config: &AppConfig) -> Result<Vec<CompensatoryFood>> {
    match flag.or_else(|| config.catalog_path.clone()) {
        Some(path) => load_compensatory_catalog(&path)
            .with_context(|| format!("Failed to load compensatory catalog '{}'", path.display())),
        None => Ok(default_compensatory_catalog()),
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Goals { profile } => {
            let profile = read_profile(&profile).await?;
            print_json(&calculate_nutritional_goals(&profile))
        }
        Command::Validate { profile, meals, date, catalog, finalize } => {
            let profile = read_profile(&profile).await?;
            let mut meals: Vec<MealEntry> = read_json(&meals).await?;
            check_meals(&meals)?;
            if let Some(day) = date {
                meals = meals_for_day(&meals, day);
                info!(%day, meals = meals.len(), "selected meals for day");
            }
            let catalog = resolve_catalog(catalog, config)?;

            let result = validate_day(&profile, &meals, &catalog)?;
            match date.filter(|_| finalize) {
                Some(day) => match result.finalize(day) {
                    Ok(summary) => print_json(&summary),
                    Err(err) => {
                        if let NutritionError::DayRejected { suggestion: Some(meal), .. } = &err {
                            let items = meal.items.len();
                            warn!(%day, items, "day rejected, printing suggestion");
                            print_json(meal)?;
                        }
                        Err(err.into())
                    }
                },
                None => print_json(&result),
            }
        }
        Command::Batch { input, catalog } => {
            let days: Vec<DayInput> = read_json(&input).await?;
            for (idx, day) in days.iter().enumerate() {
                day.profile
                    .validate()
                    .with_context(|| format!("Rejected profile of day #{}", idx))?;
                check_meals(&day.meals).with_context(|| format!("Rejected day #{}", idx))?;
            }
            let catalog = resolve_catalog(catalog, config)?;

            let results = validate_days(&days, &catalog)
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?;
            let invalid = results.iter().filter(|r| !r.is_valid).count();
            info!(days = results.len(), invalid, "batch validated");
            print_json(&results)
        }
        Command::Search { query, foods } => {
            let foods = match foods.or_else(|| config.foods_path.clone()) {
                Some(path) => load_food_references(&path)?,
                None => basic_foods(),
            };
            let hits = search_foods(&foods, &query);
            if hits.is_empty() {
                warn!(%query, "no food matched");
            }
            print_json(&hits)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    logging::init(&config);

    let cli_args = parse_args();
    run(cli_args.command, &config).await
}
