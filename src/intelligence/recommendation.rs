// ABOUTME: BMR/TDEE-based calorie recommendation engine
// ABOUTME: Mifflin-St Jeor BMR, activity-factor TDEE, and goal-adjusted daily targets
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Calorie recommendation engine.
//!
//! Computes Basal Metabolic Rate with the Mifflin-St Jeor equation (1990),
//! scales it by an activity factor into Total Daily Energy Expenditure, and
//! derives goal-adjusted daily calorie suggestions for standard weekly
//! weight-change rates.
//!
//! # Reference
//! Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241

use serde::{Deserialize, Serialize};

use crate::config::{ActivityFactorsConfig, BmrConfig, NutritionConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, Gender, GoalType, UserBiometrics};

/// Standard weekly weight-change rates and their daily calorie offsets.
///
/// ~7700 kcal per kg of body weight; the conventional simplification is
/// 250/500/1000 kcal per day for 0.25/0.5/1.0 kg per week.
const WEEKLY_RATE_OFFSETS: &[(f64, f64)] = &[(0.25, 250.0), (0.5, 500.0), (1.0, 1000.0)];

/// A single goal-adjusted daily calorie suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieSuggestion {
    /// Label for the weekly rate, e.g. "Lose 0.5 kg/week"
    pub weekly_goal: String,
    /// Suggested daily intake in kcal, rounded to the nearest whole calorie
    pub daily_calories: i64,
}

/// Result of a calorie recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieRecommendation {
    /// Basal Metabolic Rate in kcal/day (unrounded)
    pub bmr: f64,
    /// Maintenance calories: TDEE rounded to the nearest whole calorie
    pub maintenance_calories: i64,
    /// The goal the suggestions were generated for, if the user has set one
    pub goal_type: Option<GoalType>,
    /// Goal-adjusted suggestions; empty for maintenance or when no goal is set
    pub suggestions: Vec<CalorieSuggestion>,
}

/// Basal Metabolic Rate via Mifflin-St Jeor:
/// `10*W + 6.25*H - 5*A + 5` (male) or `- 161` (female).
#[must_use]
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> f64 {
    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };

    config.msj_weight_coef * weight_kg
        + config.msj_height_coef * height_cm
        + config.msj_age_coef * f64::from(age)
        + gender_constant
}

/// TDEE activity multiplier for an activity level
#[must_use]
pub fn activity_factor(level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    match level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::LightlyActive => config.lightly_active,
        ActivityLevel::ModeratelyActive => config.moderately_active,
        ActivityLevel::VeryActive => config.very_active,
        ActivityLevel::ExtraActive => config.extra_active,
    }
}

/// Compute maintenance calories and goal-adjusted suggestions from a user's
/// biometric profile.
///
/// # Errors
///
/// Returns `MissingData` when any of weight, height, age, gender, or activity
/// level is absent from the profile.
pub fn recommend(
    biometrics: &UserBiometrics,
    config: &NutritionConfig,
) -> AppResult<CalorieRecommendation> {
    let (Some(weight_kg), Some(height_cm), Some(age), Some(gender), Some(activity_level)) = (
        biometrics.weight_kg,
        biometrics.height_cm,
        biometrics.age,
        biometrics.gender,
        biometrics.activity_level,
    ) else {
        return Err(AppError::missing_data(
            "Profile is missing required information for calculation: \
             weight, height, age, gender, and activity level must all be set.",
        ));
    };

    let bmr = calculate_bmr(weight_kg, height_cm, age, gender, &config.bmr);
    let tdee = bmr * activity_factor(activity_level, &config.activity_factors);

    let suggestions = match biometrics.goal_type {
        Some(goal @ (GoalType::Deficit | GoalType::Surplus)) => WEEKLY_RATE_OFFSETS
            .iter()
            .map(|&(kg_per_week, offset)| {
                let (verb, daily) = match goal {
                    GoalType::Deficit => ("Lose", tdee - offset),
                    _ => ("Gain", tdee + offset),
                };
                CalorieSuggestion {
                    weekly_goal: format!("{verb} {kg_per_week} kg/week"),
                    daily_calories: daily.round() as i64,
                }
            })
            .collect(),
        Some(GoalType::Maintain) | None => Vec::new(),
    };

    Ok(CalorieRecommendation {
        bmr,
        maintenance_calories: tdee.round() as i64,
        goal_type: biometrics.goal_type,
        suggestions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(goal: Option<GoalType>) -> UserBiometrics {
        UserBiometrics {
            user_id: Uuid::new_v4(),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            age: Some(30),
            gender: Some(Gender::Male),
            activity_level: Some(ActivityLevel::Sedentary),
            goal_type: goal,
            weight_goal_kg: None,
            daily_calorie_intake: None,
        }
    }

    #[test]
    fn test_bmr_male_reference_case() {
        // 10*80 + 6.25*180 - 5*30 + 5 = 1780
        let bmr = calculate_bmr(80.0, 180.0, 30, Gender::Male, &BmrConfig::default());
        assert!((bmr - 1780.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmr_female_constant() {
        let male = calculate_bmr(60.0, 165.0, 25, Gender::Male, &BmrConfig::default());
        let female = calculate_bmr(60.0, 165.0, 25, Gender::Female, &BmrConfig::default());
        assert!((male - female - 166.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_maintenance_sedentary_male() {
        let rec = recommend(&profile(None), &NutritionConfig::default()).unwrap();
        // round(1780 * 1.2) = 2136
        assert_eq!(rec.maintenance_calories, 2136);
        assert!(rec.suggestions.is_empty());
    }

    #[test]
    fn test_deficit_suggestions() {
        let rec = recommend(&profile(Some(GoalType::Deficit)), &NutritionConfig::default())
            .unwrap();
        assert_eq!(rec.suggestions.len(), 3);
        assert_eq!(rec.suggestions[0].weekly_goal, "Lose 0.25 kg/week");
        assert_eq!(rec.suggestions[0].daily_calories, 2136 - 250);
        assert_eq!(rec.suggestions[2].weekly_goal, "Lose 1 kg/week");
        assert_eq!(rec.suggestions[2].daily_calories, 2136 - 1000);
    }

    #[test]
    fn test_surplus_suggestions() {
        let rec = recommend(&profile(Some(GoalType::Surplus)), &NutritionConfig::default())
            .unwrap();
        assert_eq!(rec.suggestions[1].weekly_goal, "Gain 0.5 kg/week");
        assert_eq!(rec.suggestions[1].daily_calories, 2136 + 500);
    }

    #[test]
    fn test_maintain_returns_maintenance_only() {
        let rec = recommend(&profile(Some(GoalType::Maintain)), &NutritionConfig::default())
            .unwrap();
        assert_eq!(rec.maintenance_calories, 2136);
        assert!(rec.suggestions.is_empty());
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut incomplete = profile(None);
        incomplete.activity_level = None;
        let err = recommend(&incomplete, &NutritionConfig::default()).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::MissingData);
    }
}
