// ABOUTME: Zero-filled daily time series over sparse per-day records
// ABOUTME: Merges weight, steps, water, sleep, meals, and workouts into chartable rows
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Range aggregation.
//!
//! Builds one [`DailyRecord`] per calendar day of a requested range by
//! merge-joining a generated date spine against per-entity lookups from the
//! record store. Days with no underlying entries produce zero-valued fields,
//! never gaps or nulls, so downstream charting and arithmetic stay total.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use super::derivation::round2;
use crate::errors::{AppError, AppResult};
use crate::models::{MacroTotals, GLASS_ML};
use crate::store::RecordStore;

/// One fully-derived day of tracking data.
///
/// Field order is a compatibility surface: exporters emit these columns in
/// declaration order (`date, weight_kg, daily_steps, water_intake_ml,
/// sleep_hours, calories_consumed, protein_g, carbs_g, fats_g,
/// calories_from_workouts, calories_from_steps, total_calories_burned,
/// net_calories`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar date of the row
    pub date: NaiveDate,
    /// Logged weight, 0 when absent
    pub weight_kg: f64,
    /// Logged step count, 0 when absent
    pub daily_steps: u32,
    /// Logged water intake in ml, 0 when absent
    pub water_intake_ml: u32,
    /// Logged sleep hours, 0 when absent
    pub sleep_hours: f64,
    /// Calories consumed across all meals
    pub calories_consumed: f64,
    /// Protein consumed across all meals (g)
    pub protein_g: f64,
    /// Carbohydrates consumed across all meals (g)
    pub carbs_g: f64,
    /// Fats consumed across all meals (g)
    pub fats_g: f64,
    /// Calorie burn summed over the day's workouts
    pub calories_from_workouts: f64,
    /// Calorie burn derived from the day's steps
    pub calories_from_steps: f64,
    /// `calories_from_steps + calories_from_workouts`
    pub total_calories_burned: f64,
    /// `calories_consumed - total_calories_burned`
    pub net_calories: f64,
}

/// Summary statistics over a built series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// Weight change between the first and last days with a logged weight.
    /// 0 when no weight was logged in range, which is indistinguishable from
    /// "no change"; callers needing the distinction must check entry presence.
    pub weight_change_kg: f64,
    /// Mean calories consumed per day over the full range
    pub avg_daily_calories_consumed: f64,
    /// Mean calories burned per day over the full range
    pub avg_daily_calories_burned: f64,
    /// Number of workouts logged in range
    pub total_workouts: usize,
}

/// One point of the dashboard's trailing-week trend charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Abbreviated weekday label, e.g. "Mon"
    pub name: String,
    /// Steps taken that day
    pub steps: u32,
    /// Water intake in whole 250ml glasses
    pub water_glasses: u32,
    /// Hours slept
    pub sleep_hours: f64,
}

/// Every date in [start, end] inclusive, ascending
fn date_spine(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Build a zero-filled daily series for [start, end] inclusive.
///
/// Returns exactly `(end - start).num_days() + 1` records in ascending date
/// order regardless of how sparse the underlying data is.
///
/// # Errors
///
/// Returns `InvalidInput` when `start > end`; store failures propagate.
pub async fn build_daily_series<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<DailyRecord>> {
    if start > end {
        return Err(AppError::invalid_input(format!(
            "start date {start} is after end date {end}"
        )));
    }

    let weights: HashMap<NaiveDate, f64> = store
        .weight_in_range(user_id, start, end)
        .await?
        .into_iter()
        .map(|e| (e.date, e.weight_kg))
        .collect();
    let steps: HashMap<NaiveDate, (u32, f64)> = store
        .steps_in_range(user_id, start, end)
        .await?
        .into_iter()
        .map(|e| (e.date, (e.step_count, e.calories_burned)))
        .collect();
    let water: HashMap<NaiveDate, u32> = store
        .water_in_range(user_id, start, end)
        .await?
        .into_iter()
        .map(|e| (e.date, e.milliliters))
        .collect();
    let sleep: HashMap<NaiveDate, f64> = store
        .sleep_in_range(user_id, start, end)
        .await?
        .into_iter()
        .map(|e| (e.date, e.duration_hours))
        .collect();

    // Meals and workouts allow several rows per day; fold into per-day sums.
    let mut consumed: HashMap<NaiveDate, MacroTotals> = HashMap::new();
    for meal in store.meals_in_range(user_id, start, end).await? {
        let entry = consumed.entry(meal.date).or_default();
        *entry = entry.add(meal.totals);
    }
    let mut workout_burn: HashMap<NaiveDate, f64> = HashMap::new();
    for workout in store.workouts_in_range(user_id, start, end).await? {
        *workout_burn.entry(workout.date).or_default() += workout.calories_burned;
    }

    let series = date_spine(start, end)
        .into_iter()
        .map(|date| {
            let (daily_steps, calories_from_steps) = steps.get(&date).copied().unwrap_or((0, 0.0));
            let meals = consumed.get(&date).copied().unwrap_or_default();
            let calories_from_workouts = workout_burn.get(&date).copied().unwrap_or(0.0);
            let total_calories_burned = calories_from_steps + calories_from_workouts;

            DailyRecord {
                date,
                weight_kg: weights.get(&date).copied().unwrap_or(0.0),
                daily_steps,
                water_intake_ml: water.get(&date).copied().unwrap_or(0),
                sleep_hours: sleep.get(&date).copied().unwrap_or(0.0),
                calories_consumed: meals.calories,
                protein_g: meals.protein,
                carbs_g: meals.carbs,
                fats_g: meals.fats,
                calories_from_workouts,
                calories_from_steps,
                total_calories_burned,
                net_calories: meals.calories - total_calories_burned,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        user_id = %user_id,
        days = series.len(),
        "built daily series for {start}..={end}"
    );

    Ok(series)
}

/// Summary statistics over a built series.
///
/// The weight change uses the first and last records with `weight_kg > 0`,
/// not the calendar endpoints, so sparse weigh-ins still produce a sensible
/// delta. Averages are means over the full spine (zero-filled days included)
/// rounded to whole calories.
#[must_use]
pub fn range_summary(series: &[DailyRecord], total_workouts: usize) -> RangeSummary {
    let start_weight = series
        .iter()
        .find(|r| r.weight_kg > 0.0)
        .map_or(0.0, |r| r.weight_kg);
    let end_weight = series
        .iter()
        .rev()
        .find(|r| r.weight_kg > 0.0)
        .map_or(0.0, |r| r.weight_kg);

    let days = series.len() as f64;
    let (avg_consumed, avg_burned) = if series.is_empty() {
        (0.0, 0.0)
    } else {
        (
            series.iter().map(|r| r.calories_consumed).sum::<f64>() / days,
            series.iter().map(|r| r.total_calories_burned).sum::<f64>() / days,
        )
    };

    RangeSummary {
        weight_change_kg: round2(end_weight - start_weight),
        avg_daily_calories_consumed: avg_consumed.round(),
        avg_daily_calories_burned: avg_burned.round(),
        total_workouts,
    }
}

/// Trailing seven days of steps, water, and sleep for the dashboard trend
/// charts, zero-filled like the daily series. `end` is the last (most recent)
/// day of the window.
///
/// # Errors
///
/// Store failures propagate.
pub async fn weekly_trends<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    end: NaiveDate,
) -> AppResult<Vec<TrendPoint>> {
    let start = end - chrono::Days::new(6);

    let steps: HashMap<NaiveDate, u32> = store
        .steps_in_range(user_id, start, end)
        .await?
        .into_iter()
        .map(|e| (e.date, e.step_count))
        .collect();
    let water: HashMap<NaiveDate, u32> = store
        .water_in_range(user_id, start, end)
        .await?
        .into_iter()
        .map(|e| (e.date, e.milliliters))
        .collect();
    let sleep: HashMap<NaiveDate, f64> = store
        .sleep_in_range(user_id, start, end)
        .await?
        .into_iter()
        .map(|e| (e.date, e.duration_hours))
        .collect();

    Ok(date_spine(start, end)
        .into_iter()
        .map(|date| {
            let ml = water.get(&date).copied().unwrap_or(0);
            TrendPoint {
                name: weekday_label(date),
                steps: steps.get(&date).copied().unwrap_or(0),
                // Ties round to even, so 2.5 glasses charts as 2, not 3.
                water_glasses: (f64::from(ml) / GLASS_ML).round_ties_even() as u32,
                sleep_hours: sleep.get(&date).copied().unwrap_or(0.0),
            }
        })
        .collect())
}

/// Abbreviated weekday name, e.g. "Mon"
fn weekday_label(date: NaiveDate) -> String {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
    .to_owned()
}
