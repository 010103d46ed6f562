// ABOUTME: Core data models for the FitTrack tracking engine
// ABOUTME: Defines per-day entries, meals, food items, biometrics, and goal types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Core domain entities.
//!
//! Every entity except [`FoodItem`] is exclusively owned by one user and keyed
//! by calendar date. [`FoodItem`] is a global, append-only cache of external
//! nutrition lookups, deduplicated by name and referenced by id from
//! [`FoodPortion`].
//!
//! Two fields are derivation caches, never independently-settable inputs:
//! [`StepEntry::calories_burned`] and [`MealEntry::totals`]. They are written
//! only by the service layer, synchronously with the mutation that invalidates
//! them (see `services::tracker`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Milliliters per glass when reporting water intake in glasses
pub const GLASS_ML: f64 = 250.0;

/// A user's weight on a specific date, unique per (user, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date of the measurement
    pub date: NaiveDate,
    /// Body weight in kilograms, always > 0
    pub weight_kg: f64,
}

/// Step count and derived calorie burn for a user on a specific day,
/// unique per (user, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEntry {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date of the steps
    pub date: NaiveDate,
    /// Number of steps taken
    pub step_count: u32,
    /// Derived calorie burn, recomputed on every save from the step count
    /// and the owner's current body weight
    pub calories_burned: f64,
}

/// Water intake for a user on a specific day, unique per (user, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEntry {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date of the intake
    pub date: NaiveDate,
    /// Total water consumed in milliliters
    pub milliliters: u32,
}

impl WaterEntry {
    /// Approximate number of 250ml glasses, rounded to 1 decimal
    #[must_use]
    pub fn glasses(&self) -> f64 {
        crate::intelligence::derivation::water_glasses(self.milliliters)
    }
}

/// Sleep duration for a user on a specific night, unique per (user, date).
/// The date is the morning the user woke up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepEntry {
    /// Owning user
    pub user_id: Uuid,
    /// Date of the night's sleep
    pub date: NaiveDate,
    /// Hours slept
    pub duration_hours: f64,
}

/// Nutritional data for a food item, normalized per 100g.
///
/// Global and immutable after creation; deduplicated by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Stable identifier referenced by [`FoodPortion`]
    pub id: Uuid,
    /// Food name as returned by the external lookup
    pub name: String,
    /// Calories per 100g
    pub calories: f64,
    /// Protein grams per 100g
    pub protein: f64,
    /// Carbohydrate grams per 100g
    pub carbs: f64,
    /// Fat grams per 100g
    pub fats: f64,
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Dinner
    Dinner,
    /// Snack
    Snack,
}

impl MealType {
    /// Lowercase wire name, matching the serialized form
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity of a [`FoodItem`] consumed as part of a meal.
///
/// Contributes `quantity_g / 100 x` the item's per-100g nutrients to the
/// owning meal's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPortion {
    /// Portion identifier, used for removal
    pub id: Uuid,
    /// Referenced food item
    pub food_item_id: Uuid,
    /// Quantity in grams, always > 0
    pub quantity_g: f64,
}

/// Summed macronutrients for one or more meals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Total calories (kcal)
    pub calories: f64,
    /// Total protein (g)
    pub protein: f64,
    /// Total carbohydrates (g)
    pub carbs: f64,
    /// Total fats (g)
    pub fats: f64,
}

impl MacroTotals {
    /// Component-wise sum
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
        }
    }
}

/// A meal log for a user on a specific date, at most one per
/// (user, date, meal type). Logging to an existing slot appends portions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date of the meal
    pub date: NaiveDate,
    /// Meal slot
    pub meal_type: MealType,
    /// Portions making up the meal
    pub portions: Vec<FoodPortion>,
    /// Derived macro totals, recomputed on every portion add/remove.
    /// Consumers read this cache; they never recompute from portions.
    pub totals: MacroTotals,
}

/// A workout log for a user; many per (user, date) allowed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Workout identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date of the workout
    pub date: NaiveDate,
    /// Natural-language description, e.g. "ran 5km and did 30 pushups"
    pub description: String,
    /// Calorie burn estimated by the external exercise service
    pub calories_burned: f64,
}

/// Author of a persisted chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// The human user
    User,
    /// The AI nutritionist
    Assistant,
}

/// One turn of a user's persisted nutritionist conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier, used for deletion
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Who wrote the message
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// When the message was sent
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male (Mifflin-St Jeor constant +5)
    Male,
    /// Female (Mifflin-St Jeor constant -161)
    Female,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    LightlyActive,
    /// Exercise 3-5 days/week
    ModeratelyActive,
    /// Exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise and a physical job
    ExtraActive,
}

/// The user's primary calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Lose weight (caloric deficit)
    Deficit,
    /// Gain weight (caloric surplus)
    Surplus,
    /// Maintain current weight
    Maintain,
}

impl GoalType {
    /// Human-readable label used in prompts and UI
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Deficit => "Calorie Deficit",
            Self::Surplus => "Calorie Surplus",
            Self::Maintain => "Maintain Weight",
        }
    }
}

/// Biometrics and goal configuration, one record per user.
///
/// All fields are optional: users fill in their profile over time. The
/// recommendation engine requires weight, height, age, gender, and activity
/// level; the daily snapshot requires `daily_calorie_intake`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBiometrics {
    /// Owning user
    pub user_id: Uuid,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    /// Gender for BMR calculation
    pub gender: Option<Gender>,
    /// Activity level for TDEE calculation
    pub activity_level: Option<ActivityLevel>,
    /// Primary calorie goal
    pub goal_type: Option<GoalType>,
    /// Target body weight in kilograms
    pub weight_goal_kg: Option<f64>,
    /// Daily calorie target chosen by the user
    pub daily_calorie_intake: Option<f64>,
}

impl UserBiometrics {
    /// Empty profile for a user
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            height_cm: None,
            weight_kg: None,
            age: None,
            gender: None,
            activity_level: None,
            goal_type: None,
            weight_goal_kg: None,
            daily_calorie_intake: None,
        }
    }
}

/// Daily activity goals, one record per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGoals {
    /// Owning user
    pub user_id: Uuid,
    /// Daily step target
    pub step_goal: u32,
    /// Daily water target in milliliters
    pub water_goal_ml: u32,
    /// Nightly sleep target in hours
    pub sleep_goal_hours: f64,
}

impl UserGoals {
    /// Default goals assigned to users who have not configured their own
    #[must_use]
    pub fn default_for(user_id: Uuid) -> Self {
        Self {
            user_id,
            step_goal: 8000,
            water_goal_ml: 2000,
            sleep_goal_hours: 8.0,
        }
    }
}
