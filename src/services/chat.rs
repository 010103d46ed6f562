// ABOUTME: History-aware AI-nutritionist chat over the LLM capability
// ABOUTME: Builds a profile-grounded system context with a trailing-message window and persists turns
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Nutritionist chat service.
//!
//! Each outgoing request carries a persona context built from the user's
//! biometric profile and goal, plus a trailing window of the persisted
//! conversation so the model can follow up on earlier turns. Turns are only
//! persisted once the model has replied, so a failed generation leaves the
//! conversation unchanged.

use chrono::Utc;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::external::TipGenerator;
use crate::models::{ChatMessage, ChatRole, UserBiometrics};
use crate::store::RecordStore;

/// Trailing messages included as model context
const CONTEXT_MESSAGES: usize = 5;

/// Nutritionist chat over a record store and the LLM capability
pub struct ChatService<S> {
    store: Arc<S>,
    generator: Arc<dyn TipGenerator>,
}

impl<S: RecordStore> ChatService<S> {
    /// Create a chat service
    pub fn new(store: Arc<S>, generator: Arc<dyn TipGenerator>) -> Self {
        Self { store, generator }
    }

    /// Send a user message and return the assistant's reply.
    ///
    /// Both turns are persisted after a successful generation; on failure
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty message; generation and store failures
    /// propagate.
    pub async fn send_message(&self, user_id: Uuid, text: &str) -> AppResult<ChatMessage> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("Message cannot be empty"));
        }

        let biometrics = self.store.get_biometrics(user_id).await?;
        let history = self.store.chat_history(user_id).await?;
        let prompt = build_prompt(biometrics.as_ref(), &history, trimmed);

        let reply = self.generator.generate(&prompt).await?;

        self.store
            .append_chat_message(ChatMessage {
                id: Uuid::new_v4(),
                user_id,
                role: ChatRole::User,
                content: trimmed.to_owned(),
                sent_at: Utc::now(),
            })
            .await?;
        let assistant = ChatMessage {
            id: Uuid::new_v4(),
            user_id,
            role: ChatRole::Assistant,
            content: reply,
            sent_at: Utc::now(),
        };
        self.store.append_chat_message(assistant.clone()).await?;

        info!(user_id = %user_id, turns = history.len() + 2, "chat reply generated");
        Ok(assistant)
    }

    /// The user's full conversation, oldest first.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub async fn history(&self, user_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        self.store.chat_history(user_id).await
    }

    /// Delete one message from the conversation.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when the message does not exist.
    pub async fn delete_message(&self, user_id: Uuid, message_id: Uuid) -> AppResult<()> {
        self.store.delete_chat_message(user_id, message_id).await
    }

    /// Delete the entire conversation.
    ///
    /// # Errors
    ///
    /// Store failures propagate.
    pub async fn clear(&self, user_id: Uuid) -> AppResult<()> {
        self.store.clear_chat(user_id).await
    }
}

/// Assemble the nutritionist prompt: persona, profile facts, the trailing
/// conversation window, and the new message.
fn build_prompt(
    biometrics: Option<&UserBiometrics>,
    history: &[ChatMessage],
    message: &str,
) -> String {
    let mut prompt = String::from(
        "You are 'FitCoach', a friendly and knowledgeable AI nutritionist. \
         Answer the user's questions with practical, evidence-based guidance \
         tailored to their profile.\n\n",
    );

    let profile_lines = biometrics.map_or_else(Vec::new, profile_facts);
    if profile_lines.is_empty() {
        prompt.push_str("The user has not filled in their profile yet.\n");
    } else {
        prompt.push_str("Here is the user's profile:\n");
        for line in &profile_lines {
            let _ = writeln!(prompt, "{line}");
        }
    }

    let recent = &history[history.len().saturating_sub(CONTEXT_MESSAGES)..];
    if !recent.is_empty() {
        prompt.push_str("\nConversation so far:\n");
        for turn in recent {
            let speaker = match turn.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "FitCoach",
            };
            let _ = writeln!(prompt, "{speaker}: {}", turn.content);
        }
    }

    let _ = write!(
        prompt,
        "\nUser: {message}\n\n\
         Reply as FitCoach. Keep the answer focused and under 150 words. \
         Do NOT invent measurements the profile does not contain. \
         Your entire response must be only the reply.",
    );
    prompt
}

/// Profile fact lines for the fields the user has filled in
fn profile_facts(biometrics: &UserBiometrics) -> Vec<String> {
    let mut facts = Vec::new();
    if let Some(weight) = biometrics.weight_kg {
        facts.push(format!("- Weight: {weight} kg"));
    }
    if let Some(height) = biometrics.height_cm {
        facts.push(format!("- Height: {height} cm"));
    }
    if let Some(age) = biometrics.age {
        facts.push(format!("- Age: {age}"));
    }
    if let Some(goal) = biometrics.goal_type {
        facts.push(format!("- Main Goal: {}", goal.display_name()));
    }
    if let Some(target) = biometrics.daily_calorie_intake {
        facts.push(format!("- Daily Calorie Target: {target:.0} kcal"));
    }
    facts
}
