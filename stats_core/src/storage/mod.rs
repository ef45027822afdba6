//! Postgres-backed storage for team standings snapshots.

mod stats_table;

pub use stats_table::StatsStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::TeamStanding;

/// Storage operations the pipeline depends on.
///
/// Kept behind a trait so the orchestrator can run against an injected fake
/// in tests instead of a live database.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Ensure the backing table exists. Success when it already does.
    async fn ensure_table(&self) -> Result<()>;

    /// Persist one snapshot per standing, all sharing a single capture
    /// timestamp. Returns the number of items written. An empty slice is a
    /// valid zero-item batch.
    async fn put_team_stats(&self, standings: &[TeamStanding]) -> Result<usize>;
}
