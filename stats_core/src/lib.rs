//! NBA Stats Core - shared building blocks for the stats pipeline.
//!
//! This library provides:
//! - Team standings models for the sportsdata.io API
//! - Float-to-exact-decimal conversion for store-bound values
//! - HTTP client for the standings endpoint
//! - Postgres-backed stats store (table provisioning + batch writes)

pub mod clients;
pub mod models;
pub mod storage;
pub mod transform;

pub use models::{TeamStanding, TeamStatsItem};
pub use transform::floats_to_decimals;
