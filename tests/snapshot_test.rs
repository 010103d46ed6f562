// ABOUTME: Integration tests for the daily goal-comparison snapshot
// ABOUTME: Covers the missing-goal error, status bands, and cached-totals consumption
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use uuid::Uuid;

use common::{day, test_store};
use fittrack_core::errors::ErrorCode;
use fittrack_core::intelligence::{daily_snapshot, GoalStatus};
use fittrack_core::models::{MacroTotals, MealEntry, MealType, UserBiometrics};
use fittrack_core::store::RecordStore;

async fn set_goal(
    store: &dyn RecordStore,
    user_id: Uuid,
    daily_calorie_intake: f64,
) -> Result<()> {
    let mut profile = UserBiometrics::new(user_id);
    profile.daily_calorie_intake = Some(daily_calorie_intake);
    store.save_biometrics(profile).await?;
    Ok(())
}

async fn log_calories(
    store: &dyn RecordStore,
    user_id: Uuid,
    meal_type: MealType,
    calories: f64,
) -> Result<()> {
    store
        .save_meal(MealEntry {
            user_id,
            date: day(1),
            meal_type,
            portions: Vec::new(),
            totals: MacroTotals {
                calories,
                protein: 0.0,
                carbs: 0.0,
                fats: 0.0,
            },
        })
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_snapshot_requires_calorie_goal() {
    let store = test_store();
    let err = daily_snapshot(store.as_ref(), Uuid::new_v4(), day(1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingData);
    assert_eq!(
        err.message,
        "Please set your daily calorie intake in your profile to use this feature."
    );
}

#[tokio::test]
async fn test_empty_day_is_significantly_under() -> Result<()> {
    let store = test_store();
    let user_id = Uuid::new_v4();
    set_goal(store.as_ref(), user_id, 2000.0).await?;

    let snapshot = daily_snapshot(store.as_ref(), user_id, day(1)).await?;
    assert!((snapshot.remaining - 2000.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.status, GoalStatus::SignificantlyUnder);
    assert_eq!(
        snapshot.status_message,
        "You are significantly under your daily goal. Remaining: 2000.00 calories."
    );

    Ok(())
}

#[tokio::test]
async fn test_snapshot_sums_all_meal_slots() -> Result<()> {
    let store = test_store();
    let user_id = Uuid::new_v4();
    set_goal(store.as_ref(), user_id, 2000.0).await?;
    log_calories(store.as_ref(), user_id, MealType::Breakfast, 450.0).await?;
    log_calories(store.as_ref(), user_id, MealType::Lunch, 700.0).await?;
    log_calories(store.as_ref(), user_id, MealType::Snack, 150.0).await?;

    let snapshot = daily_snapshot(store.as_ref(), user_id, day(1)).await?;
    assert!((snapshot.consumed.calories - 1300.0).abs() < f64::EPSILON);
    assert!((snapshot.remaining - 700.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.status, GoalStatus::SignificantlyUnder);

    Ok(())
}

#[tokio::test]
async fn test_hitting_goal_exactly_counts_as_under() -> Result<()> {
    let store = test_store();
    let user_id = Uuid::new_v4();
    set_goal(store.as_ref(), user_id, 2000.0).await?;
    log_calories(store.as_ref(), user_id, MealType::Dinner, 2000.0).await?;

    let snapshot = daily_snapshot(store.as_ref(), user_id, day(1)).await?;
    assert!((snapshot.remaining).abs() < f64::EPSILON);
    assert_eq!(snapshot.status, GoalStatus::Under);
    assert_eq!(
        snapshot.status_message,
        "You are under your daily goal. Remaining: 0.00 calories."
    );

    Ok(())
}

#[tokio::test]
async fn test_slightly_and_significantly_over_bands() -> Result<()> {
    let store = test_store();
    let user_id = Uuid::new_v4();
    set_goal(store.as_ref(), user_id, 2000.0).await?;

    // 200 over: still "slightly".
    log_calories(store.as_ref(), user_id, MealType::Dinner, 2200.0).await?;
    let snapshot = daily_snapshot(store.as_ref(), user_id, day(1)).await?;
    assert_eq!(snapshot.status, GoalStatus::SlightlyOver);
    assert_eq!(
        snapshot.status_message,
        "You have slightly exceeded your daily goal. Over by: 200.00 calories."
    );

    // 201 over: significant.
    log_calories(store.as_ref(), user_id, MealType::Dinner, 2201.0).await?;
    let snapshot = daily_snapshot(store.as_ref(), user_id, day(1)).await?;
    assert_eq!(snapshot.status, GoalStatus::SignificantlyOver);
    assert_eq!(
        snapshot.status_message,
        "You are significantly over your daily goal. Over by: 201.00 calories."
    );

    Ok(())
}

#[tokio::test]
async fn test_snapshot_scoped_to_requested_date() -> Result<()> {
    let store = test_store();
    let user_id = Uuid::new_v4();
    set_goal(store.as_ref(), user_id, 2000.0).await?;
    log_calories(store.as_ref(), user_id, MealType::Lunch, 1800.0).await?;

    // A different day sees none of it.
    let snapshot = daily_snapshot(store.as_ref(), user_id, day(2)).await?;
    assert!((snapshot.consumed.calories).abs() < f64::EPSILON);

    Ok(())
}
