// ABOUTME: Domain service layer for business logic above the record store
// ABOUTME: Validated write path with recompute-on-write, and daily tip generation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Domain services.
//!
//! [`tracker::Tracker`] is the validated write path: it rejects malformed
//! input before any derivation logic runs and recomputes cached fields
//! synchronously with every mutation that invalidates them.
//! [`daily_tip::DailyTipService`] phrases the day's computed facts into a
//! short coaching tip through the LLM capability, degrading gracefully when
//! the service is unavailable. [`chat::ChatService`] carries a persisted,
//! history-aware nutritionist conversation over the same capability.

/// History-aware nutritionist chat
pub mod chat;
/// Daily coaching tip generation
pub mod daily_tip;
/// Validated write path for logged entries
pub mod tracker;

pub use chat::ChatService;
pub use daily_tip::{DailyTipService, FALLBACK_TIP, ONBOARDING_TIP};
pub use tracker::Tracker;
