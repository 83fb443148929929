use nutri_day::catalog::{default_compensatory_catalog, CompensatoryFood};
use nutri_day::food::{meals_for_day, FoodReference, MealEntry, MealItem, Unit};
use nutri_day::logging;
use nutri_day::nutrition::{
    calculate_day_nutrition, calculate_nutritional_goals, generate_compensatory_meal, validate_day,
    DayNutrition, DayStatus, NutritionalGoals, SuggestedFood,
};
use nutri_day::profile::{ActivityLevel, Sex, UserProfile, WeightGoal};
use nutri_day::summary::DaySummary;
use nutri_day::NutritionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::macros::{date, datetime};

fn setup_test_environment() {
    logging::init_test();
}

fn athlete() -> UserProfile {
    UserProfile {
        weight: 70.0,
        height: 175.0,
        age: 30,
        sex: Sex::Male,
        activity_level: ActivityLevel::Moderate,
        goal: WeightGoal::Maintenance,
    }
}

fn food(name: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodReference {
    FoodReference {
        name: name.to_string(),
        calories,
        protein,
        carbs,
        fat,
        unit: Unit::G,
    }
}

fn logged_meals() -> Vec<MealEntry> {
    let oats = food("Oat flakes", 389.0, 16.9, 66.0, 6.9);
    let chicken = food("Chicken breast", 165.0, 31.0, 0.0, 3.6);
    let rice = food("Cooked white rice", 130.0, 2.7, 28.0, 0.3);
    let broccoli = food("Broccoli", 34.0, 2.8, 7.0, 0.4);
    vec![
        MealEntry {
            meal_type: "breakfast".to_string(),
            timestamp: datetime!(2025-03-10 07:45 +01:00),
            items: vec![MealItem { food: oats, quantity: 80.0 }],
        },
        MealEntry {
            meal_type: "lunch".to_string(),
            timestamp: datetime!(2025-03-10 12:30 +01:00),
            items: vec![
                MealItem { food: chicken.clone(), quantity: 150.0 },
                MealItem { food: rice.clone(), quantity: 200.0 },
            ],
        },
        MealEntry {
            meal_type: "dinner".to_string(),
            timestamp: datetime!(2025-03-10 20:00 +01:00),
            items: vec![
                MealItem { food: chicken, quantity: 120.0 },
                MealItem { food: broccoli, quantity: 200.0 },
            ],
        },
        MealEntry {
            meal_type: "breakfast".to_string(),
            timestamp: datetime!(2025-03-11 08:00 +01:00),
            items: vec![MealItem { food: rice, quantity: 300.0 }],
        },
    ]
}

#[test]
fn test_reference_goals() {
    let goals = calculate_nutritional_goals(&athlete());
    assert_eq!(goals, NutritionalGoals { calories: 2556, protein: 160, carbs: 319, fat: 71 });
}

#[test]
fn test_full_day_under_goal_with_suggestion() {
    setup_test_environment();
    let meals = meals_for_day(&logged_meals(), date!(2025 - 03 - 10));
    assert_eq!(meals.len(), 3);

    // oats 311.2 + chicken 247.5 + rice 260 + chicken 198 + broccoli 68 = 1084.7 kcal
    // protein 13.52 + 46.5 + 5.4 + 37.2 + 5.6 = 108.22 g
    let totals = calculate_day_nutrition(&meals);
    assert_eq!(totals.total_calories, 1085);
    assert_eq!(totals.total_protein, 108);

    let catalog = default_compensatory_catalog();
    let result = validate_day(&athlete(), &meals, &catalog).unwrap();
    // 108 / 160 = 67.5 % protein
    assert_eq!(result.status, DayStatus::UnderGoal);
    assert!(!result.is_valid);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(
        result.violations[0].to_string(),
        "protein intake insufficient: 68% (min required 70%)"
    );

    let suggestion = result.suggestion.as_ref().expect("deficit is large");
    // Protein gap 52 g: ceil(52 / 31) = 2 portions of chicken = 200 g, then the fill.
    assert_eq!(suggestion.items[0].name, "Chicken breast");
    assert_eq!(suggestion.items[0].quantity, 200.0);
    assert!(suggestion.items.len() > 1);

    let err = result.finalize(date!(2025 - 03 - 10)).unwrap_err();
    assert!(matches!(err, NutritionError::DayRejected { .. }));
}

#[test]
fn test_validation_is_idempotent() {
    let meals = logged_meals();
    let catalog = default_compensatory_catalog();
    let first = validate_day(&athlete(), &meals, &catalog).unwrap();
    let second = validate_day(&athlete(), &meals, &catalog).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_result_json_shape() {
    let catalog = default_compensatory_catalog();
    let result = validate_day(&athlete(), &[], &catalog).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["is_valid"], false);
    assert_eq!(json["status"], "under_goal");
    assert_eq!(json["totals"]["total_calories"], 0);
    assert_eq!(json["goals"]["protein"], 160);
    assert_eq!(json["violations"][0], "protein intake insufficient: 0% (min required 70%)");
    assert_eq!(json["suggestion"]["items"][0]["unit"], "g");
}

#[test]
fn test_balanced_day_finalizes() {
    let meals = vec![MealEntry {
        meal_type: "everything".to_string(),
        timestamp: datetime!(2025-03-12 13:00 UTC),
        items: vec![MealItem {
            food: food("Meal prep box", 1250.0, 77.0, 160.0, 35.0),
            quantity: 200.0,
        }],
    }];
    let catalog = default_compensatory_catalog();
    let result = validate_day(&athlete(), &meals, &catalog).unwrap();
    assert_eq!(result.status, DayStatus::Balanced);
    assert!(result.suggestion.is_none());

    let summary = result.finalize(date!(2025 - 03 - 12)).unwrap();
    assert_eq!(
        summary,
        DaySummary {
            date: date!(2025 - 03 - 12),
            total_calories: 2500,
            total_protein: 154,
            total_carbs: 320,
            total_fat: 70,
            status: DayStatus::Balanced,
        }
    );
}

fn random_catalog(rng: &mut StdRng) -> Vec<CompensatoryFood> {
    let mut catalog = default_compensatory_catalog();
    for _ in 0..6 {
        catalog.push(CompensatoryFood {
            name: format!("Item {}", rng.gen::<u32>()),
            calories: rng.gen_range(20.0..650.0),
            protein: rng.gen_range(0.0..35.0),
            carbs: rng.gen_range(0.0..70.0),
            fat: rng.gen_range(0.0..60.0),
            unit: Unit::G,
            base_quantity: [30.0, 50.0, 100.0][rng.gen_range(0..3)],
        });
    }
    catalog
}

#[test]
fn test_suggestion_rounding_stays_within_item_count() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let catalog = random_catalog(&mut rng);
        let goals = NutritionalGoals {
            calories: rng.gen_range(1400..3500),
            protein: rng.gen_range(60..220),
            carbs: 250,
            fat: 70,
        };
        let totals = DayNutrition {
            total_calories: rng.gen_range(0..goals.calories),
            total_protein: rng.gen_range(0..goals.protein),
            ..Default::default()
        };
        let Some(suggestion) = generate_compensatory_meal(&totals, &goals, &catalog) else {
            continue;
        };
        let n = suggestion.items.len() as i64;
        let item_sum = |amount: fn(&SuggestedFood) -> u32| -> i64 {
            suggestion.items.iter().map(|i| amount(i) as i64).sum()
        };
        let sums = [
            (item_sum(|i| i.calories), suggestion.total_calories),
            (item_sum(|i| i.protein), suggestion.total_protein),
            (item_sum(|i| i.carbs), suggestion.total_carbs),
            (item_sum(|i| i.fat), suggestion.total_fat),
        ];
        for (item_sum, total) in sums {
            assert!((item_sum - total as i64).abs() <= n);
        }
    }
}

#[test]
fn test_phase_one_entry_precedes_fill_entries() {
    let catalog = default_compensatory_catalog();
    let goals = NutritionalGoals { calories: 2000, protein: 100, carbs: 250, fat: 60 };
    let totals = DayNutrition { total_calories: 1600, total_protein: 80, ..Default::default() };
    let suggestion = generate_compensatory_meal(&totals, &goals, &catalog).unwrap();

    let position = |name: &str| catalog.iter().position(|f| f.name == name).unwrap();
    assert_eq!(suggestion.items[0].name, "Chicken breast");
    let fill: Vec<usize> = suggestion.items[1..].iter().map(|i| position(&i.name)).collect();
    assert!(fill.windows(2).all(|w| w[0] < w[1]), "fill must follow catalog order");
}
