// ABOUTME: Exercise-calorie estimation via the Nutritionix natural/exercise endpoint
// ABOUTME: Sends a workout description plus biometrics, sums the returned exercise burns
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Exercise-calorie estimation.
//!
//! Given a natural-language workout description ("ran 5km and did 30 pushups")
//! and the user's biometrics, the Nutritionix exercise endpoint returns one
//! entry per recognized exercise; the estimate is the sum of their calorie
//! burns. An empty result is a not-found outcome, surfaced to the user as
//! "could not find data" rather than a generic failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::nutrition::NutritionixConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Gender, UserBiometrics};

/// Capability: estimate calorie burn for a workout description
#[async_trait]
pub trait ExerciseEstimator: Send + Sync {
    /// Estimate total calories burned for a described workout.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when no exercise is recognized in the description;
    /// `ExternalServiceError`/`Unavailable` on transport or protocol failures.
    async fn estimate(&self, description: &str, biometrics: &UserBiometrics) -> AppResult<f64>;
}

/// Nutritionix `natural/exercise` client; shares credentials with the
/// nutrition lookup client
pub struct NutritionixExerciseClient {
    config: NutritionixConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ExerciseRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ExerciseResponse {
    #[serde(default)]
    exercises: Vec<Exercise>,
}

#[derive(Debug, Deserialize)]
struct Exercise {
    nf_calories: f64,
}

impl NutritionixExerciseClient {
    /// Create a client with the given configuration
    #[must_use]
    pub fn new(config: NutritionixConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when credentials are unset.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(NutritionixConfig::from_env()?))
    }
}

#[async_trait]
impl ExerciseEstimator for NutritionixExerciseClient {
    async fn estimate(&self, description: &str, biometrics: &UserBiometrics) -> AppResult<f64> {
        let url = format!("{}/natural/exercise", self.config.base_url);
        let request = ExerciseRequest {
            query: description,
            gender: biometrics.gender.map(|g| match g {
                Gender::Male => "male",
                Gender::Female => "female",
            }),
            weight_kg: biometrics.weight_kg,
            height_cm: biometrics.height_cm,
            age: biometrics.age,
        };

        let response = self
            .http_client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .header("x-app-id", &self.config.app_id)
            .header("x-app-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external_unavailable("Nutritionix", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Nutritionix",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: ExerciseResponse = response.json().await.map_err(|e| {
            AppError::external_service("Nutritionix", format!("JSON parse error: {e}"))
        })?;

        if body.exercises.is_empty() {
            return Err(AppError::not_found(format!(
                "exercise data for '{description}'"
            )));
        }

        let total: f64 = body.exercises.iter().map(|e| e.nf_calories).sum();
        debug!(
            description,
            exercises = body.exercises.len(),
            total_calories = total,
            "estimated workout calorie burn"
        );

        Ok(total)
    }
}
