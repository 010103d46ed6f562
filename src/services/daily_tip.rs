// ABOUTME: Daily coaching tip built from the day's computed facts
// ABOUTME: Prompts the LLM capability with facts only and degrades gracefully on failure
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Daily tip service.
//!
//! Collects the user's facts for the day (goal, consumption, workout burn,
//! steps, sleep), builds a persona prompt that forbids the model from
//! inventing numbers, and asks the [`TipGenerator`] capability to phrase one
//! short tip. A generation failure never propagates: the caller gets a fixed
//! apology line instead.

use chrono::NaiveDate;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::external::TipGenerator;
use crate::store::RecordStore;

/// Shown when the user has logged nothing yet today
pub const ONBOARDING_TIP: &str =
    "Log your first activity of the day to unlock a personalized tip!";

/// Shown when tip generation fails
pub const FALLBACK_TIP: &str = "Could not generate a tip at this time.";

/// Daily tip service over a record store and the LLM capability
pub struct DailyTipService<S> {
    store: Arc<S>,
    generator: Arc<dyn TipGenerator>,
}

impl<S: RecordStore> DailyTipService<S> {
    /// Create a tip service
    pub fn new(store: Arc<S>, generator: Arc<dyn TipGenerator>) -> Self {
        Self { store, generator }
    }

    /// Produce the tip for a user's day.
    ///
    /// # Errors
    ///
    /// Store failures propagate; generation failures do not (the fallback
    /// line is returned instead).
    pub async fn daily_tip(&self, user_id: Uuid, today: NaiveDate) -> AppResult<String> {
        let biometrics = self.store.get_biometrics(user_id).await?;

        let calories_consumed: f64 = self
            .store
            .meals_for_date(user_id, today)
            .await?
            .iter()
            .map(|m| m.totals.calories)
            .sum();
        let calories_burned: f64 = self
            .store
            .workouts_for_date(user_id, today)
            .await?
            .iter()
            .map(|w| w.calories_burned)
            .sum();
        let steps = self
            .store
            .get_steps(user_id, today)
            .await?
            .map(|e| e.step_count);
        let sleep_hours = self
            .store
            .get_sleep(user_id, today)
            .await?
            .map(|e| e.duration_hours);

        let mut facts = Vec::new();
        let mut data_found = false;

        if let Some(goal) = biometrics.as_ref().and_then(|b| b.daily_calorie_intake) {
            facts.push(format!("- Calorie Goal: {goal:.0} kcal"));
        }
        if calories_consumed > 0.0 {
            facts.push(format!("- Calories Consumed: {calories_consumed:.0} kcal"));
            data_found = true;
        }
        if calories_burned > 0.0 {
            facts.push(format!(
                "- Calories Burned from Workouts: {calories_burned:.0} kcal"
            ));
            data_found = true;
        }
        if let Some(steps) = steps.filter(|s| *s > 0) {
            facts.push(format!("- Steps Taken: {steps}"));
            data_found = true;
        }
        if let Some(sleep) = sleep_hours.filter(|h| *h > 0.0) {
            facts.push(format!("- Last Night's Sleep: {sleep} hours"));
            data_found = true;
        }

        if !data_found {
            return Ok(ONBOARDING_TIP.to_owned());
        }

        let goal_label = biometrics
            .as_ref()
            .and_then(|b| b.goal_type)
            .map_or("their fitness goals", |g| g.display_name());

        let prompt = build_prompt(goal_label, &facts);

        match self.generator.generate(&prompt).await {
            Ok(tip) => Ok(tip),
            Err(error) => {
                warn!(user_id = %user_id, %error, "tip generation failed, returning fallback");
                Ok(FALLBACK_TIP.to_owned())
            }
        }
    }
}

/// Assemble the FitCoach persona prompt. The instructions restrict the model
/// to phrasing the supplied facts; it must not invent data.
fn build_prompt(goal_label: &str, facts: &[String]) -> String {
    let mut prompt = format!(
        "You are 'FitCoach', a friendly and insightful AI assistant. \
         Your user's main goal is to {goal_label}.\n\n\
         Here is the user's data for today:\n"
    );
    for fact in facts {
        let _ = writeln!(prompt, "{fact}");
    }
    prompt.push_str(
        "\nHere are your instructions:\n\
         1. Analyze the user's data above.\n\
         2. Pick the single most relevant fact to comment on.\n\
         3. Write one short, motivational, and actionable tip based ONLY on that fact and the user's main goal.\n\
         4. The tip must be under 30 words, encouraging, and feel personal.\n\
         5. Do NOT invent any data or percentages.\n\n\
         IMPORTANT: Do not write anything before the tip. Your entire response must only be the tip itself.",
    );
    prompt
}
