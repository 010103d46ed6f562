// ABOUTME: Main library entry point for the FitTrack tracking core
// ABOUTME: Exposes models, record store, derivation/aggregation engines, and external capability clients
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # FitTrack Core
//!
//! Domain core for a personal fitness and nutrition tracking backend. Users
//! log meals, workouts, weight, steps, water, and sleep; this crate turns
//! those logs into zero-filled daily time series, single-day goal snapshots,
//! and BMR/TDEE-based calorie recommendations, and phrases a daily coaching
//! tip through a pluggable language-model capability.
//!
//! The HTTP layer, authentication, and real persistence engine live outside
//! this crate. Persistence is abstracted behind [`store::RecordStore`];
//! external nutrition, exercise-calorie, and LLM services are abstracted
//! behind the capability traits in [`external`], so all derivation arithmetic
//! is testable with in-memory fakes.

/// Formula coefficients and external-service configuration
pub mod config;
/// Unified error handling
pub mod errors;
/// External capability traits and HTTP clients (nutrition, exercise, LLM tips)
pub mod external;
/// Derivation, aggregation, snapshot, and recommendation engines
pub mod intelligence;
/// Structured logging setup
pub mod logging;
/// Core domain entities
pub mod models;
/// Validated write path and daily-tip services
pub mod services;
/// Record store abstraction and in-memory implementation
pub mod store;
