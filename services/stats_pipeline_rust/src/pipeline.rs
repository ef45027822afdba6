//! Pipeline orchestrator: provision -> fetch -> persist, strictly in order.

use nba_stats_core::clients::SportsDataClient;
use nba_stats_core::storage::StatsRepository;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Failure kinds surfaced at the invocation boundary.
///
/// A fetch failure is a reported outcome rather than a propagated cause (the
/// fetch layer already logged the details and downgraded to "no data"), so it
/// carries a fixed message. Provisioning and persistence keep their
/// underlying cause.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to fetch NBA stats")]
    Fetch,
    #[error("failed to set up stats table: {0}")]
    Provision(anyhow::Error),
    #[error("failed to store team stats: {0}")]
    Persist(anyhow::Error),
}

/// One-shot stats pipeline. All dependencies are injected at construction;
/// nothing reads the environment mid-run.
pub struct StatsPipeline {
    client: SportsDataClient,
    store: Arc<dyn StatsRepository>,
    season: String,
}

impl StatsPipeline {
    pub fn new(client: SportsDataClient, store: Arc<dyn StatsRepository>, season: &str) -> Self {
        Self {
            client,
            store,
            season: season.to_string(),
        }
    }

    /// Run one provision -> fetch -> persist cycle.
    ///
    /// Returns the number of team snapshots written. An empty standings
    /// response is success with zero writes.
    pub async fn run(&self) -> Result<usize, PipelineError> {
        self.store
            .ensure_table()
            .await
            .map_err(PipelineError::Provision)?;

        let standings = match self.client.fetch_standings(&self.season).await {
            Some(standings) => standings,
            None => return Err(PipelineError::Fetch),
        };

        if let Ok(sample) = serde_json::to_string_pretty(&standings[..standings.len().min(2)]) {
            debug!(sample = %sample, "Sample of fetched standings");
        }

        let stored = self
            .store
            .put_team_stats(&standings)
            .await
            .map_err(PipelineError::Persist)?;

        info!(teams_count = stored, season = %self.season, "Pipeline run complete");
        Ok(stored)
    }
}
