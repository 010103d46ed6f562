// ABOUTME: External API client modules (nutrition, exercise estimation, LLM tips)
// ABOUTME: Capability traits with HTTP implementations so the core is testable with fakes

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! External service integrations.
//!
//! Each integration is modeled as a capability trait so the derivation and
//! aggregation logic never touches the network directly:
//!
//! - [`NutritionLookup`]: text query to per-100g nutrient facts
//! - [`ExerciseEstimator`]: workout description + biometrics to calorie burn
//! - [`TipGenerator`]: structured prompt to free-text coaching tip
//!
//! All HTTP clients use short timeouts and surface failures as
//! `ExternalServiceError`/`ExternalServiceUnavailable`; callers degrade
//! gracefully rather than crashing an aggregation.

/// Exercise-calorie estimation client
pub mod exercise;
/// Nutrition lookup clients (Nutritionix primary, Open Food Facts fallback)
pub mod nutrition;
/// LLM-backed tip generation client
pub mod tips;

pub use exercise::{ExerciseEstimator, NutritionixExerciseClient};
pub use nutrition::{
    FallbackLookup, FoodFacts, NutritionLookup, NutritionixClient, NutritionixConfig,
    OpenFoodFactsClient,
};
pub use tips::{GroqClient, GroqConfig, TipGenerator};
