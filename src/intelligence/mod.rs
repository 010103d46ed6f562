// ABOUTME: Derivation and analysis engines for logged fitness data
// ABOUTME: Calorie derivation, range aggregation, daily snapshots, and calorie recommendations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Analysis engines over the record store.
//!
//! - [`derivation`]: pure calorie/macro arithmetic shared by the write path
//!   and the aggregators
//! - [`aggregator`]: zero-filled daily time series and range summaries
//! - [`snapshot`]: single-day consumption vs. goal comparison
//! - [`recommendation`]: BMR/TDEE-based calorie suggestions

/// Zero-filled daily time series and range summaries
pub mod aggregator;
/// Pure calorie and macro derivation functions
pub mod derivation;
/// BMR/TDEE calorie recommendations
pub mod recommendation;
/// Single-day goal comparison
pub mod snapshot;

pub use aggregator::{build_daily_series, range_summary, weekly_trends, DailyRecord, RangeSummary, TrendPoint};
pub use recommendation::{recommend, CalorieRecommendation, CalorieSuggestion};
pub use snapshot::{daily_snapshot, DailySnapshot, GoalStatus};
