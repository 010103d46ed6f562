// ABOUTME: Nutrition lookup clients returning per-100g nutrient facts
// ABOUTME: Nutritionix natural-language API with Open Food Facts fallback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Nutrition lookup.
//!
//! [`NutritionixClient`] resolves a natural-language food query through the
//! Nutritionix `natural/nutrients` endpoint and normalizes the serving-based
//! response to a per-100g basis. When the API omits the serving weight the
//! result cannot be normalized and is treated as not-found.
//!
//! [`OpenFoodFactsClient`] serves as a fallback; its responses already carry
//! `*_100g` fields. [`FallbackLookup`] chains the two the way the product
//! uses them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

/// Default request timeout for nutrition lookups
const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Nutrient facts for a food, normalized per 100g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodFacts {
    /// Food name as reported by the source API
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

/// Capability: resolve a text query to per-100g nutrient facts
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Look up nutrient facts for a food query.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when no match exists or the result cannot be
    /// normalized to 100g; `ExternalServiceError`/`Unavailable` on transport
    /// or protocol failures.
    async fn lookup(&self, query: &str) -> AppResult<FoodFacts>;
}

/// Nutritionix API client configuration
#[derive(Debug, Clone)]
pub struct NutritionixConfig {
    /// Application id (`x-app-id` header)
    pub app_id: String,
    /// API key (`x-app-key` header)
    pub api_key: String,
    /// Base URL for the Nutritionix track API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for NutritionixConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            api_key: String::new(),
            base_url: "https://trackapi.nutritionix.com/v2".to_owned(),
            timeout_secs: LOOKUP_TIMEOUT_SECS,
        }
    }
}

impl NutritionixConfig {
    /// Build configuration from `NUTRITIONIX_APP_ID` / `NUTRITIONIX_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when either variable is unset.
    pub fn from_env() -> AppResult<Self> {
        let app_id = env::var("NUTRITIONIX_APP_ID")
            .map_err(|_| AppError::config("NUTRITIONIX_APP_ID is not set"))?;
        let api_key = env::var("NUTRITIONIX_API_KEY")
            .map_err(|_| AppError::config("NUTRITIONIX_API_KEY is not set"))?;
        Ok(Self {
            app_id,
            api_key,
            ..Self::default()
        })
    }
}

/// Nutritionix `natural/nutrients` client
pub struct NutritionixClient {
    config: NutritionixConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct NutrientsRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct NutrientsResponse {
    #[serde(default)]
    foods: Vec<NutritionixFood>,
}

#[derive(Debug, Deserialize)]
struct NutritionixFood {
    food_name: String,
    serving_weight_grams: Option<f64>,
    nf_calories: Option<f64>,
    nf_protein: Option<f64>,
    nf_total_carbohydrate: Option<f64>,
    nf_total_fat: Option<f64>,
}

impl NutritionixClient {
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
impl NutritionLookup for NutritionixClient {
    async fn lookup(&self, query: &str) -> AppResult<FoodFacts> {
        let url = format!("{}/natural/nutrients", self.config.base_url);
        let response = self
            .http_client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .header("x-app-id", &self.config.app_id)
            .header("x-app-key", &self.config.api_key)
            .json(&NutrientsRequest { query })
            .send()
            .await
            .map_err(|e| AppError::external_unavailable("Nutritionix", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Nutritionix",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: NutrientsResponse = response.json().await.map_err(|e| {
            AppError::external_service("Nutritionix", format!("JSON parse error: {e}"))
        })?;

        let Some(food) = body.foods.into_iter().next() else {
            return Err(AppError::not_found(format!("nutritional data for '{query}'")));
        };

        // Serving-based values cannot be normalized without a serving weight.
        let Some(serving_grams) = food.serving_weight_grams.filter(|g| *g > 0.0) else {
            warn!(
                query,
                "Nutritionix did not provide a serving weight; cannot normalize to 100g"
            );
            return Err(AppError::not_found(format!("nutritional data for '{query}'")));
        };

        let factor = 100.0 / serving_grams;
        debug!(query, name = %food.food_name, serving_grams, "normalized Nutritionix result");

        Ok(FoodFacts {
            name: food.food_name,
            calories: food.nf_calories.unwrap_or(0.0) * factor,
            protein: food.nf_protein.unwrap_or(0.0) * factor,
            carbs: food.nf_total_carbohydrate.unwrap_or(0.0) * factor,
            fats: food.nf_total_fat.unwrap_or(0.0) * factor,
        })
    }
}

/// Open Food Facts search client (fallback source)
pub struct OpenFoodFactsClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl Default for OpenFoodFactsClient {
    fn default() -> Self {
        Self::new("https://world.openfoodfacts.org/cgi/search.pl".to_owned())
    }
}

#[derive(Debug, Deserialize)]
struct OffResponse {
    #[serde(default)]
    products: Vec<OffProduct>,
}

#[derive(Debug, Deserialize)]
struct OffProduct {
    product_name: Option<String>,
    #[serde(default)]
    nutriments: OffNutriments,
}

#[derive(Debug, Default, Deserialize)]
struct OffNutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<f64>,
    proteins_100g: Option<f64>,
    carbohydrates_100g: Option<f64>,
    fat_100g: Option<f64>,
}

impl OpenFoodFactsClient {
    /// Create a client against the given search endpoint
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NutritionLookup for OpenFoodFactsClient {
    async fn lookup(&self, query: &str) -> AppResult<FoodFacts> {
        let response = self
            .http_client
            .get(&self.base_url)
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .query(&[
                ("search_terms", query),
                ("json", "1"),
                ("page_size", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_unavailable("Open Food Facts", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Open Food Facts",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: OffResponse = response.json().await.map_err(|e| {
            AppError::external_service("Open Food Facts", format!("JSON parse error: {e}"))
        })?;

        let Some(product) = body.products.into_iter().next() else {
            return Err(AppError::not_found(format!("nutritional data for '{query}'")));
        };

        let Some(name) = product.product_name.filter(|n| !n.is_empty()) else {
            return Err(AppError::not_found(format!("nutritional data for '{query}'")));
        };

        // Open Food Facts reports per-100g fields directly; no normalization.
        Ok(FoodFacts {
            name,
            calories: product.nutriments.energy_kcal_100g.unwrap_or(0.0),
            protein: product.nutriments.proteins_100g.unwrap_or(0.0),
            carbs: product.nutriments.carbohydrates_100g.unwrap_or(0.0),
            fats: product.nutriments.fat_100g.unwrap_or(0.0),
        })
    }
}

/// Chains a primary lookup with a fallback source.
///
/// Any failure of the primary (not-found, transport, protocol) falls through
/// to the fallback; the fallback's outcome is final.
pub struct FallbackLookup<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackLookup<P, F> {
    /// Compose a primary and fallback lookup
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> NutritionLookup for FallbackLookup<P, F>
where
    P: NutritionLookup,
    F: NutritionLookup,
{
    async fn lookup(&self, query: &str) -> AppResult<FoodFacts> {
        match self.primary.lookup(query).await {
            Ok(facts) => Ok(facts),
            Err(primary_err) => {
                warn!(query, error = %primary_err, "primary nutrition lookup failed, trying fallback");
                self.fallback.lookup(query).await
            }
        }
    }
}
