// ABOUTME: LLM-backed tip generation via Groq's OpenAI-compatible chat API
// ABOUTME: Turns a structured prompt of computed facts into one short coaching tip
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Tip generation.
//!
//! The language model only phrases facts the core has already computed; the
//! prompt instructs it never to invent numbers, and callers degrade to a
//! fixed apology line when generation fails (see `services::daily_tip`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::debug;

use crate::errors::{AppError, AppResult};

/// Environment variable for the Groq API key
const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Default model to use
const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Base URL for the Groq API (OpenAI-compatible)
const API_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default request timeout for tip generation
const GENERATE_TIMEOUT_SECS: u64 = 15;

/// Capability: phrase a free-text tip from a structured prompt
#[async_trait]
pub trait TipGenerator: Send + Sync {
    /// Generate free text from a prompt.
    ///
    /// # Errors
    ///
    /// `ExternalServiceError`/`Unavailable` on transport, protocol, or empty
    /// completion failures.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Groq client configuration
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key from the Groq console
    pub api_key: String,
    /// Base URL (OpenAI-compatible)
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl GroqConfig {
    /// Build configuration from `GROQ_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the key is unset.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(GROQ_API_KEY_ENV)
            .map_err(|_| AppError::config(format!("{GROQ_API_KEY_ENV} is not set")))?;
        Ok(Self {
            api_key,
            base_url: API_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout_secs: GENERATE_TIMEOUT_SECS,
        })
    }
}

/// Groq chat-completions client (OpenAI-compatible wire format)
pub struct GroqClient {
    config: GroqConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl GroqClient {
    /// Create a client with the given configuration
    #[must_use]
    pub fn new(config: GroqConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `GROQ_API_KEY` is unset.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(GroqConfig::from_env()?))
    }
}

#[async_trait]
impl TipGenerator for GroqClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::external_unavailable("Groq", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "Groq",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service("Groq", format!("JSON parse error: {e}")))?;

        let Some(choice) = body.choices.into_iter().next() else {
            return Err(AppError::external_service("Groq", "empty completion"));
        };

        debug!(model = %self.config.model, "generated tip");
        Ok(choice.message.content)
    }
}
