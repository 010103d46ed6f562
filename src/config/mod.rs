// ABOUTME: Configuration management module for formula coefficients and service settings
// ABOUTME: Holds nutrition-science constants and environment-driven external-service config
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Configuration module for the FitTrack core
//!
//! - **Nutrition**: BMR/TDEE formula coefficients, activity factors, and
//!   step-calorie constants with documented, research-backed defaults
//!
//! External-service configuration (API keys, base URLs, timeouts) lives next
//! to each client in [`crate::external`], read from environment variables.

/// Nutrition formula configuration
pub mod nutrition;

pub use nutrition::{ActivityFactorsConfig, BmrConfig, NutritionConfig, StepCaloriesConfig};
