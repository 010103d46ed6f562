// ABOUTME: Pure calorie and macronutrient derivation functions
// ABOUTME: Step calorie burn, per-portion nutrient scaling, and meal totals

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Calorie derivation
//!
//! Total functions with no fallible paths; inputs are validated upstream by
//! the service layer. These are the single source of the arithmetic behind
//! the cached fields on `StepEntry` and `MealEntry` - the write path calls
//! them synchronously on every invalidating mutation, and readers trust the
//! cached result.

use crate::config::StepCaloriesConfig;
use crate::models::{FoodItem, FoodPortion, MacroTotals, GLASS_ML};

/// Round to 2 decimal places for display
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place for display
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calories burned by walking `step_count` steps.
///
/// `step_count x 0.04 x (weight / 70)`; when the walker's weight is unknown
/// the reference-weight estimate `step_count x 0.04` is used instead.
#[must_use]
pub fn step_calories(step_count: u32, weight_kg: Option<f64>, config: &StepCaloriesConfig) -> f64 {
    let per_step = match weight_kg {
        Some(weight) => config.kcal_per_step * (weight / config.reference_weight_kg),
        None => config.kcal_per_step,
    };
    f64::from(step_count) * per_step
}

/// Nutrient contribution of a portion, scaled from the per-100g value and
/// rounded to 2 decimals for display.
#[must_use]
pub fn portion_nutrient(per_100g: f64, quantity_g: f64) -> f64 {
    round2(per_100g * quantity_g / 100.0)
}

/// Exact macro totals over a meal's portions.
///
/// Sums the unrounded per-portion contributions (`per_100g x quantity / 100`)
/// so the cached totals are exact; rounding is applied only when individual
/// portions are displayed.
#[must_use]
pub fn meal_totals<'a, I>(portions: I) -> MacroTotals
where
    I: IntoIterator<Item = (&'a FoodPortion, &'a FoodItem)>,
{
    portions
        .into_iter()
        .fold(MacroTotals::default(), |acc, (portion, item)| {
            let factor = portion.quantity_g / 100.0;
            acc.add(MacroTotals {
                calories: item.calories * factor,
                protein: item.protein * factor,
                carbs: item.carbs * factor,
                fats: item.fats * factor,
            })
        })
}

/// Water intake expressed as 250ml glasses, rounded to 1 decimal
#[must_use]
pub fn water_glasses(milliliters: u32) -> f64 {
    round1(f64::from(milliliters) / GLASS_ML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn food(calories: f64, protein: f64, carbs: f64, fats: f64) -> FoodItem {
        FoodItem {
            id: Uuid::new_v4(),
            name: "test food".to_owned(),
            calories,
            protein,
            carbs,
            fats,
        }
    }

    fn portion_of(item: &FoodItem, quantity_g: f64) -> FoodPortion {
        FoodPortion {
            id: Uuid::new_v4(),
            food_item_id: item.id,
            quantity_g,
        }
    }

    #[test]
    fn test_step_calories_zero_steps() {
        let config = StepCaloriesConfig::default();
        assert!((step_calories(0, Some(90.0), &config)).abs() < f64::EPSILON);
        assert!((step_calories(0, None, &config)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_step_calories_reference_weight() {
        let config = StepCaloriesConfig::default();
        // 10000 steps at the 70kg reference weight burn 400 kcal
        assert!((step_calories(10_000, Some(70.0), &config) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_calories_scales_with_weight() {
        let config = StepCaloriesConfig::default();
        let heavier = step_calories(10_000, Some(105.0), &config);
        assert!((heavier - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_calories_unknown_weight_falls_back() {
        let config = StepCaloriesConfig::default();
        assert!((step_calories(5000, None, &config) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_portion_nutrient_rounds_for_display() {
        // 3.33 per 100g x 33g = 1.0989 -> 1.10
        assert!((portion_nutrient(3.33, 33.0) - 1.10).abs() < 1e-9);
    }

    #[test]
    fn test_meal_totals_exact_sum() {
        let rice = food(130.0, 2.7, 28.0, 0.3);
        let chicken = food(165.0, 31.0, 0.0, 3.6);
        let p1 = portion_of(&rice, 200.0);
        let p2 = portion_of(&chicken, 150.0);

        let totals = meal_totals([(&p1, &rice), (&p2, &chicken)]);
        assert!((totals.calories - (130.0 * 2.0 + 165.0 * 1.5)).abs() < 1e-9);
        assert!((totals.protein - (2.7 * 2.0 + 31.0 * 1.5)).abs() < 1e-9);
        assert!((totals.carbs - 56.0).abs() < 1e-9);
        assert!((totals.fats - (0.3 * 2.0 + 3.6 * 1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_meal_totals_empty_is_zero() {
        let portions: Vec<(&FoodPortion, &FoodItem)> = Vec::new();
        let totals = meal_totals(portions);
        assert!((totals.calories).abs() < f64::EPSILON);
        assert!((totals.fats).abs() < f64::EPSILON);
    }

    #[test]
    fn test_water_glasses() {
        assert!((water_glasses(625) - 2.5).abs() < f64::EPSILON);
        assert!((water_glasses(0)).abs() < f64::EPSILON);
        // 1.333... litres -> 5.3 glasses
        assert!((water_glasses(1333) - 5.3).abs() < f64::EPSILON);
    }
}
