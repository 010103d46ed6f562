// ABOUTME: Nutrition calculation configuration with research-backed default coefficients
// ABOUTME: BMR formula constants, TDEE activity factors, and step-calorie parameters
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Nutrition formula configuration
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. <https://doi.org/10.1093/ajcn/51.2.241>
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
//!   (activity factor multipliers)

use serde::{Deserialize, Serialize};

/// Complete nutrition formula configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// BMR formula coefficients
    pub bmr: BmrConfig,
    /// TDEE activity factor multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Step-based calorie burn parameters
    pub step_calories: StepCaloriesConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle` et al. (2010) Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
    /// Extra active (hard training 2x/day): 1.9
    pub extra_active: f64,
}

/// Step-based calorie burn parameters
///
/// A common estimate is ~0.04 kcal per step for a 70kg walker, scaled
/// linearly by body weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepCaloriesConfig {
    /// Calories burned per step at the reference weight (0.04)
    pub kcal_per_step: f64,
    /// Reference body weight in kilograms (70.0)
    pub reference_weight_kg: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

impl Default for StepCaloriesConfig {
    fn default() -> Self {
        Self {
            kcal_per_step: 0.04,
            reference_weight_kg: 70.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_activity_factors_match_mcardle_table() {
        let factors = ActivityFactorsConfig::default();
        assert!((factors.sedentary - 1.2).abs() < f64::EPSILON);
        assert!((factors.lightly_active - 1.375).abs() < f64::EPSILON);
        assert!((factors.moderately_active - 1.55).abs() < f64::EPSILON);
        assert!((factors.very_active - 1.725).abs() < f64::EPSILON);
        assert!((factors.extra_active - 1.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_bmr_coefficients() {
        let bmr = BmrConfig::default();
        assert!((bmr.msj_weight_coef - 10.0).abs() < f64::EPSILON);
        assert!((bmr.msj_male_constant - 5.0).abs() < f64::EPSILON);
        assert!((bmr.msj_female_constant - (-161.0)).abs() < f64::EPSILON);
    }
}
