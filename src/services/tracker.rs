// ABOUTME: Validated write path for logged fitness entries
// ABOUTME: Owns synchronous recompute-on-write for derived calorie and macro caches
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Tracker service.
//!
//! All mutations flow through here. Inputs are validated before derivation
//! logic runs (`InvalidInput` for non-positive quantities and duplicate
//! one-per-day entries), and the two derivation caches are recomputed within
//! the same operation as the write that invalidates them:
//!
//! - `StepEntry.calories_burned` on every step save, from the owner's
//!   current biometric weight
//! - `MealEntry.totals` on every portion add/remove

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::NutritionConfig;
use crate::errors::{AppError, AppResult};
use crate::external::{ExerciseEstimator, NutritionLookup};
use crate::intelligence::derivation::{meal_totals, step_calories};
use crate::intelligence::recommendation::{recommend, CalorieRecommendation};
use crate::models::{
    FoodItem, FoodPortion, MealEntry, MealType, SleepEntry, StepEntry, UserBiometrics, WaterEntry,
    WeightEntry, WorkoutEntry,
};
use crate::store::RecordStore;

/// Validated write path over a record store and the external capabilities
pub struct Tracker<S> {
    store: Arc<S>,
    nutrition: Arc<dyn NutritionLookup>,
    exercise: Arc<dyn ExerciseEstimator>,
    config: NutritionConfig,
}

impl<S: RecordStore> Tracker<S> {
    /// Create a tracker over a store and external capabilities
    pub fn new(
        store: Arc<S>,
        nutrition: Arc<dyn NutritionLookup>,
        exercise: Arc<dyn ExerciseEstimator>,
        config: NutritionConfig,
    ) -> Self {
        Self {
            store,
            nutrition,
            exercise,
            config,
        }
    }

    /// Shared access to the underlying store
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // ================================
    // Daily entries
    // ================================

    /// Log a weight measurement for a date.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the weight is not positive; `ResourceAlreadyExists`
    /// when the (user, date) already has an entry.
    pub async fn log_weight(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        weight_kg: f64,
    ) -> AppResult<WeightEntry> {
        if weight_kg <= 0.0 {
            return Err(AppError::invalid_input("Weight must be positive"));
        }
        let entry = WeightEntry {
            user_id,
            date,
            weight_kg,
        };
        self.store.insert_weight(entry.clone()).await?;
        info!(user_id = %user_id, %date, weight_kg, "logged weight");
        Ok(entry)
    }

    /// Log a step count for a date, deriving the calorie burn from the
    /// owner's current biometric weight.
    ///
    /// # Errors
    ///
    /// `ResourceAlreadyExists` when the (user, date) already has an entry.
    pub async fn log_steps(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        step_count: u32,
    ) -> AppResult<StepEntry> {
        let entry = self.derived_step_entry(user_id, date, step_count).await?;
        self.store.insert_steps(entry.clone()).await?;
        info!(user_id = %user_id, %date, step_count, calories = entry.calories_burned, "logged steps");
        Ok(entry)
    }

    /// Replace the step count for a date, re-deriving the calorie burn.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when no entry exists for the (user, date).
    pub async fn update_steps(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        step_count: u32,
    ) -> AppResult<StepEntry> {
        let entry = self.derived_step_entry(user_id, date, step_count).await?;
        self.store.update_steps(entry.clone()).await?;
        debug!(user_id = %user_id, %date, step_count, "updated steps, calorie burn re-derived");
        Ok(entry)
    }

    async fn derived_step_entry(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        step_count: u32,
    ) -> AppResult<StepEntry> {
        let weight_kg = self
            .store
            .get_biometrics(user_id)
            .await?
            .and_then(|b| b.weight_kg);
        Ok(StepEntry {
            user_id,
            date,
            step_count,
            calories_burned: step_calories(step_count, weight_kg, &self.config.step_calories),
        })
    }

    /// Log water intake for a date.
    ///
    /// # Errors
    ///
    /// `ResourceAlreadyExists` when the (user, date) already has an entry.
    pub async fn log_water(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        milliliters: u32,
    ) -> AppResult<WaterEntry> {
        let entry = WaterEntry {
            user_id,
            date,
            milliliters,
        };
        self.store.insert_water(entry.clone()).await?;
        info!(user_id = %user_id, %date, milliliters, "logged water");
        Ok(entry)
    }

    /// Log a night's sleep for a date.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the duration is negative; `ResourceAlreadyExists`
    /// when the (user, date) already has an entry.
    pub async fn log_sleep(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        duration_hours: f64,
    ) -> AppResult<SleepEntry> {
        if duration_hours < 0.0 {
            return Err(AppError::invalid_input("Sleep duration cannot be negative"));
        }
        let entry = SleepEntry {
            user_id,
            date,
            duration_hours,
        };
        self.store.insert_sleep(entry.clone()).await?;
        info!(user_id = %user_id, %date, duration_hours, "logged sleep");
        Ok(entry)
    }

    // ================================
    // Meals
    // ================================

    /// Log food portions into a meal slot. An existing (user, date, meal type)
    /// meal receives the portions appended; otherwise a new meal is created.
    /// The cached macro totals are recomputed in the same operation.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for non-positive quantities; `ResourceNotFound` when a
    /// referenced food item does not exist.
    pub async fn log_meal(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
        portions: &[(Uuid, f64)],
    ) -> AppResult<MealEntry> {
        for &(_, quantity_g) in portions {
            if quantity_g <= 0.0 {
                return Err(AppError::invalid_input("Portion quantity must be positive"));
            }
        }

        let mut meal = self
            .store
            .get_meal(user_id, date, meal_type)
            .await?
            .unwrap_or_else(|| MealEntry {
                user_id,
                date,
                meal_type,
                portions: Vec::new(),
                totals: crate::models::MacroTotals::default(),
            });

        for &(food_item_id, quantity_g) in portions {
            meal.portions.push(FoodPortion {
                id: Uuid::new_v4(),
                food_item_id,
                quantity_g,
            });
        }

        self.recompute_and_save(meal).await
    }

    /// Remove a portion from a meal, recomputing the cached totals in the
    /// same operation.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the meal or portion does not exist.
    pub async fn remove_portion(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
        portion_id: Uuid,
    ) -> AppResult<MealEntry> {
        let mut meal = self
            .store
            .get_meal(user_id, date, meal_type)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{meal_type} on {date}")))?;

        let before = meal.portions.len();
        meal.portions.retain(|p| p.id != portion_id);
        if meal.portions.len() == before {
            return Err(AppError::not_found("meal portion"));
        }

        self.recompute_and_save(meal).await
    }

    /// Recompute the meal's cached totals from its portions and persist.
    /// This is the only writer of `MealEntry.totals`.
    async fn recompute_and_save(&self, mut meal: MealEntry) -> AppResult<MealEntry> {
        let mut items = Vec::with_capacity(meal.portions.len());
        for portion in &meal.portions {
            let item = self
                .store
                .get_food(portion.food_item_id)
                .await?
                .ok_or_else(|| AppError::not_found("food item"))?;
            items.push(item);
        }

        meal.totals = meal_totals(meal.portions.iter().zip(items.iter()));
        self.store.save_meal(meal.clone()).await?;
        debug!(
            user_id = %meal.user_id,
            date = %meal.date,
            meal_type = %meal.meal_type,
            calories = meal.totals.calories,
            "meal totals recomputed"
        );
        Ok(meal)
    }

    // ================================
    // Workouts
    // ================================

    /// Log a workout, estimating its calorie burn through the external
    /// exercise service using the user's biometrics.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty description; estimator failures propagate
    /// (`ResourceNotFound` when no exercise is recognized).
    pub async fn log_workout(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        description: &str,
    ) -> AppResult<WorkoutEntry> {
        if description.trim().is_empty() {
            return Err(AppError::invalid_input("Workout description cannot be empty"));
        }

        let biometrics = self
            .store
            .get_biometrics(user_id)
            .await?
            .unwrap_or_else(|| UserBiometrics::new(user_id));

        let calories_burned = self.exercise.estimate(description, &biometrics).await?;

        let entry = WorkoutEntry {
            id: Uuid::new_v4(),
            user_id,
            date,
            description: description.to_owned(),
            calories_burned,
        };
        self.store.insert_workout(entry.clone()).await?;
        info!(user_id = %user_id, %date, calories_burned, "logged workout");
        Ok(entry)
    }

    // ================================
    // Food catalog
    // ================================

    /// Search the external nutrition sources for a food and cache the result
    /// in the shared catalog, deduplicated by the name the source reports.
    /// Returns the item and whether it was newly created.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for queries with non-letter characters;
    /// `ResourceNotFound` when no source has a match.
    pub async fn search_food(&self, query: &str) -> AppResult<(FoodItem, bool)> {
        let trimmed = query.trim();
        if trimmed.is_empty()
            || !trimmed
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == ' ')
        {
            return Err(AppError::invalid_input(
                "Please enter a valid food name using only letters.",
            ));
        }

        let facts = self.nutrition.lookup(trimmed).await?;

        if let Some(existing) = self.store.find_food_by_name(&facts.name).await? {
            debug!(name = %facts.name, "food already cached");
            return Ok((existing, false));
        }

        let item = FoodItem {
            id: Uuid::new_v4(),
            name: facts.name,
            calories: facts.calories,
            protein: facts.protein,
            carbs: facts.carbs,
            fats: facts.fats,
        };
        self.store.insert_food(item.clone()).await?;
        info!(name = %item.name, "cached new food item");
        Ok((item, true))
    }

    // ================================
    // Profile & recommendations
    // ================================

    /// Insert or replace the user's biometric profile
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub async fn save_biometrics(&self, biometrics: UserBiometrics) -> AppResult<()> {
        self.store.save_biometrics(biometrics).await
    }

    /// Compute maintenance calories and goal-adjusted suggestions for a user.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the user has no profile; `MissingData` when
    /// required biometric fields are absent.
    pub async fn calorie_recommendation(&self, user_id: Uuid) -> AppResult<CalorieRecommendation> {
        let biometrics = self
            .store
            .get_biometrics(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user profile"))?;
        recommend(&biometrics, &self.config)
    }
}
