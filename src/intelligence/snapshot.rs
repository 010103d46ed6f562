// ABOUTME: Single-day consumption summary compared against the user's calorie goal
// ABOUTME: Sums cached meal totals and classifies the remainder into status bands
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Daily snapshot / goal comparator.
//!
//! Sums the day's cached meal totals, subtracts from the configured daily
//! calorie goal, and classifies the remainder into one of four non-overlapping
//! status bands. A remainder of exactly zero counts as [`GoalStatus::Under`]:
//! hitting the goal on the nose is treated as being (just) within it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::MacroTotals;
use crate::store::RecordStore;

/// How far the day's consumption sits from the calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// More than 200 kcal remaining
    SignificantlyUnder,
    /// Between 0 and 200 kcal remaining (inclusive at both ends)
    Under,
    /// Over the goal by at most 200 kcal
    SlightlyOver,
    /// Over the goal by more than 200 kcal
    SignificantlyOver,
}

/// Single-day consumption vs. goal summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    /// Date the snapshot covers
    pub date: NaiveDate,
    /// Macros consumed across all meal types, 0 when nothing was logged
    pub consumed: MacroTotals,
    /// The user's configured daily calorie goal
    pub goal: f64,
    /// `goal - consumed.calories`; negative when over
    pub remaining: f64,
    /// Band the remainder falls in
    pub status: GoalStatus,
    /// Human-readable status line carrying the remainder amount
    pub status_message: String,
}

/// Band boundary: remainders within this many kcal of the goal are "slight"
const SIGNIFICANT_KCAL: f64 = 200.0;

/// Classify a calorie remainder into its status band
#[must_use]
pub fn goal_status(remaining: f64) -> GoalStatus {
    if remaining > SIGNIFICANT_KCAL {
        GoalStatus::SignificantlyUnder
    } else if remaining >= 0.0 {
        GoalStatus::Under
    } else if remaining >= -SIGNIFICANT_KCAL {
        GoalStatus::SlightlyOver
    } else {
        GoalStatus::SignificantlyOver
    }
}

/// Render the user-facing status line for a band and remainder
#[must_use]
pub fn status_message(status: GoalStatus, remaining: f64) -> String {
    match status {
        GoalStatus::SignificantlyUnder => format!(
            "You are significantly under your daily goal. Remaining: {remaining:.2} calories."
        ),
        GoalStatus::Under => {
            format!("You are under your daily goal. Remaining: {remaining:.2} calories.")
        }
        GoalStatus::SlightlyOver => {
            let over = -remaining;
            format!("You have slightly exceeded your daily goal. Over by: {over:.2} calories.")
        }
        GoalStatus::SignificantlyOver => {
            let over = -remaining;
            format!("You are significantly over your daily goal. Over by: {over:.2} calories.")
        }
    }
}

/// Build the goal-comparison snapshot for a single day.
///
/// # Errors
///
/// Returns `MissingData` when the user has no daily calorie intake
/// configured; store failures propagate.
pub async fn daily_snapshot<S: RecordStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    date: NaiveDate,
) -> AppResult<DailySnapshot> {
    let goal = store
        .get_biometrics(user_id)
        .await?
        .and_then(|b| b.daily_calorie_intake)
        .ok_or_else(|| {
            AppError::missing_data(
                "Please set your daily calorie intake in your profile to use this feature.",
            )
        })?;

    // Consumers read the cached per-meal totals; the write path keeps them
    // in sync with the portions.
    let consumed = store
        .meals_for_date(user_id, date)
        .await?
        .into_iter()
        .fold(MacroTotals::default(), |acc, meal| acc.add(meal.totals));

    let remaining = goal - consumed.calories;
    let status = goal_status(remaining);

    Ok(DailySnapshot {
        date,
        consumed,
        goal,
        remaining,
        status,
        status_message: status_message(status, remaining),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(goal_status(201.0), GoalStatus::SignificantlyUnder);
        assert_eq!(goal_status(200.0), GoalStatus::Under);
        assert_eq!(goal_status(1.0), GoalStatus::Under);
        assert_eq!(goal_status(0.0), GoalStatus::Under);
        assert_eq!(goal_status(-1.0), GoalStatus::SlightlyOver);
        assert_eq!(goal_status(-200.0), GoalStatus::SlightlyOver);
        assert_eq!(goal_status(-201.0), GoalStatus::SignificantlyOver);
    }

    #[test]
    fn test_status_message_formats_remainder() {
        let message = status_message(GoalStatus::Under, 200.0);
        assert_eq!(
            message,
            "You are under your daily goal. Remaining: 200.00 calories."
        );

        let over = status_message(GoalStatus::SignificantlyOver, -201.0);
        assert_eq!(
            over,
            "You are significantly over your daily goal. Over by: 201.00 calories."
        );
    }
}
