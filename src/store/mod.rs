// ABOUTME: Record store abstraction for per-user, per-date fitness entries
// ABOUTME: Plugin-style trait with an in-memory implementation for tests and embedding
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Record store abstraction.
//!
//! All persistence implementations expose this trait so the analysis engines
//! and the tracker service stay independent of the storage backend. The
//! aggregators assume the store itself never errors on absent data: a missing
//! entry is `Ok(None)` or an empty vec, never a failure.
//!
//! One-per-day resources (weight, steps, water, sleep) distinguish `insert`
//! (rejects a duplicate (user, date) key) from `update` where the write path
//! needs both; meals are upserted because logging into an existing slot is an
//! append, and workouts allow many rows per day.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{
    ChatMessage, FoodItem, MealEntry, MealType, SleepEntry, StepEntry, UserBiometrics, UserGoals,
    WaterEntry, WeightEntry, WorkoutEntry,
};

pub mod memory;

pub use memory::MemoryStore;

/// Core record store abstraction
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ================================
    // Weight
    // ================================

    /// Insert a weight entry; fails if one exists for the (user, date)
    async fn insert_weight(&self, entry: WeightEntry) -> AppResult<()>;

    /// Get the weight entry for a date
    async fn get_weight(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<WeightEntry>>;

    /// Weight entries in [start, end] inclusive, ascending by date
    async fn weight_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WeightEntry>>;

    // ================================
    // Steps
    // ================================

    /// Insert a step entry; fails if one exists for the (user, date)
    async fn insert_steps(&self, entry: StepEntry) -> AppResult<()>;

    /// Replace an existing step entry; fails if none exists for the (user, date)
    async fn update_steps(&self, entry: StepEntry) -> AppResult<()>;

    /// Get the step entry for a date
    async fn get_steps(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<StepEntry>>;

    /// Step entries in [start, end] inclusive, ascending by date
    async fn steps_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<StepEntry>>;

    // ================================
    // Water
    // ================================

    /// Insert a water entry; fails if one exists for the (user, date)
    async fn insert_water(&self, entry: WaterEntry) -> AppResult<()>;

    /// Get the water entry for a date
    async fn get_water(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<WaterEntry>>;

    /// Water entries in [start, end] inclusive, ascending by date
    async fn water_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WaterEntry>>;

    // ================================
    // Sleep
    // ================================

    /// Insert a sleep entry; fails if one exists for the (user, date)
    async fn insert_sleep(&self, entry: SleepEntry) -> AppResult<()>;

    /// Get the sleep entry for a date
    async fn get_sleep(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<SleepEntry>>;

    /// Sleep entries in [start, end] inclusive, ascending by date
    async fn sleep_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<SleepEntry>>;

    // ================================
    // Meals
    // ================================

    /// Get the meal for a (user, date, meal type) slot
    async fn get_meal(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
    ) -> AppResult<Option<MealEntry>>;

    /// Insert or replace the meal for its (user, date, meal type) slot
    async fn save_meal(&self, entry: MealEntry) -> AppResult<()>;

    /// All meals logged on a date
    async fn meals_for_date(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<MealEntry>>;

    /// All meals in [start, end] inclusive
    async fn meals_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MealEntry>>;

    // ================================
    // Workouts
    // ================================

    /// Insert a workout; many per (user, date) are allowed
    async fn insert_workout(&self, entry: WorkoutEntry) -> AppResult<()>;

    /// Workouts logged on a date
    async fn workouts_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<WorkoutEntry>>;

    /// Workouts in [start, end] inclusive
    async fn workouts_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WorkoutEntry>>;

    // ================================
    // Food catalog
    // ================================

    /// Append a food item to the shared catalog
    async fn insert_food(&self, item: FoodItem) -> AppResult<()>;

    /// Get a food item by id
    async fn get_food(&self, id: Uuid) -> AppResult<Option<FoodItem>>;

    /// Find a food item by exact name (the catalog is deduplicated by name)
    async fn find_food_by_name(&self, name: &str) -> AppResult<Option<FoodItem>>;

    // ================================
    // Chat history
    // ================================

    /// Append a message to a user's conversation
    async fn append_chat_message(&self, message: ChatMessage) -> AppResult<()>;

    /// A user's full conversation, oldest first
    async fn chat_history(&self, user_id: Uuid) -> AppResult<Vec<ChatMessage>>;

    /// Delete one message from a user's conversation
    async fn delete_chat_message(&self, user_id: Uuid, message_id: Uuid) -> AppResult<()>;

    /// Delete a user's entire conversation
    async fn clear_chat(&self, user_id: Uuid) -> AppResult<()>;

    // ================================
    // Biometrics & goals
    // ================================

    /// Get a user's biometric profile
    async fn get_biometrics(&self, user_id: Uuid) -> AppResult<Option<UserBiometrics>>;

    /// Insert or replace a user's biometric profile
    async fn save_biometrics(&self, biometrics: UserBiometrics) -> AppResult<()>;

    /// Get a user's daily goals, falling back to the defaults (8000 steps,
    /// 2000ml water, 8h sleep) when none are configured
    async fn get_goals(&self, user_id: Uuid) -> AppResult<UserGoals>;

    /// Insert or replace a user's daily goals
    async fn save_goals(&self, goals: UserGoals) -> AppResult<()>;
}
