// ABOUTME: Shared test utilities and fake external capabilities for integration tests
// ABOUTME: Provides store setup, fixed-date helpers, and canned lookup/estimator/tip fakes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fittrack_core`
//!
//! Fake implementations of the external capability traits so integration
//! tests exercise the services without network access.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::external::{ExerciseEstimator, FoodFacts, NutritionLookup, TipGenerator};
use fittrack_core::models::UserBiometrics;
use fittrack_core::store::MemoryStore;

/// A calendar date in July 2024 (the 1st was a Monday)
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

/// Fresh in-memory store
pub fn test_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

/// Nutrition lookup returning a fixed result, or not-found when `None`
pub struct FakeNutrition {
    pub facts: Option<FoodFacts>,
}

impl FakeNutrition {
    pub fn with(facts: FoodFacts) -> Arc<Self> {
        Arc::new(Self { facts: Some(facts) })
    }

    pub fn not_found() -> Arc<Self> {
        Arc::new(Self { facts: None })
    }
}

#[async_trait]
impl NutritionLookup for FakeNutrition {
    async fn lookup(&self, query: &str) -> AppResult<FoodFacts> {
        self.facts
            .clone()
            .ok_or_else(|| AppError::not_found(format!("nutritional data for '{query}'")))
    }
}

/// Exercise estimator returning a fixed burn and recording the biometrics
/// it was called with
pub struct FakeExercise {
    pub calories: f64,
    pub seen_biometrics: Mutex<Vec<UserBiometrics>>,
}

impl FakeExercise {
    pub fn burning(calories: f64) -> Arc<Self> {
        Arc::new(Self {
            calories,
            seen_biometrics: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ExerciseEstimator for FakeExercise {
    async fn estimate(&self, _description: &str, biometrics: &UserBiometrics) -> AppResult<f64> {
        self.seen_biometrics.lock().unwrap().push(biometrics.clone());
        Ok(self.calories)
    }
}

/// Tip generator that echoes a canned tip (or fails) and records the prompts
/// it received
pub struct FakeTips {
    pub tip: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeTips {
    pub fn saying(tip: &str) -> Arc<Self> {
        Arc::new(Self {
            tip: Some(tip.to_owned()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            tip: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TipGenerator for FakeTips {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.tip
            .clone()
            .ok_or_else(|| AppError::external_unavailable("Groq", "connection refused"))
    }
}

/// Apple-like per-100g facts used across tests
pub fn apple_facts() -> FoodFacts {
    FoodFacts {
        name: "apple".to_owned(),
        calories: 52.0,
        protein: 0.3,
        carbs: 13.8,
        fats: 0.2,
    }
}

/// Profile with everything the recommendation engine needs
pub fn complete_profile(user_id: Uuid) -> UserBiometrics {
    UserBiometrics {
        user_id,
        height_cm: Some(180.0),
        weight_kg: Some(80.0),
        age: Some(30),
        gender: Some(fittrack_core::models::Gender::Male),
        activity_level: Some(fittrack_core::models::ActivityLevel::Sedentary),
        goal_type: None,
        weight_goal_kg: None,
        daily_calorie_intake: None,
    }
}
