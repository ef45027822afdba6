use anyhow::{Context, Result};
use dotenv::dotenv;
use nba_stats_core::clients::SportsDataClient;
use nba_stats_core::storage::{StatsRepository, StatsStore};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use stats_pipeline_rust::config::Config;
use stats_pipeline_rust::handler;
use stats_pipeline_rust::logging;
use stats_pipeline_rust::pipeline::StatsPipeline;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Config before logging so a missing credential fails fast either way.
    let config = Config::from_env()?;
    logging::init(config.log_dir.as_deref());

    info!(
        service = "nba-stats",
        base_url = %config.base_url,
        table_name = %config.table_name,
        season = %config.season,
        "Initialized NBA stats pipeline"
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let client = SportsDataClient::new(&config.base_url, &config.api_key);
    let store: Arc<dyn StatsRepository> = Arc::new(StatsStore::new(pool, &config.table_name)?);
    let pipeline = StatsPipeline::new(client, store, &config.season);

    let response = handler::handle(json!({}), &pipeline).await;

    if response.status_code != 200 {
        std::process::exit(1);
    }
    Ok(())
}
