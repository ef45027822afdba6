use anyhow::{anyhow, Context, Result};
use std::env;

const DEFAULT_BASE_URL: &str = "https://api.sportsdata.io/v3/nba";
const DEFAULT_SEASON: &str = "2024";

#[derive(Debug, Clone)]
pub struct Config {
    /// sportsdata.io subscription key.
    pub api_key: String,
    pub base_url: String,
    pub database_url: String,
    pub table_name: String,
    /// Season token, passed verbatim to the standings endpoint.
    pub season: String,
    /// Directory for the mirrored daily log file; `None` disables the mirror.
    pub log_dir: Option<String>,
}

impl Config {
    /// Read and validate all configuration once, at startup. Nothing else in
    /// the pipeline touches the environment.
    pub fn from_env() -> Result<Self> {
        let api_key =
            env::var("SPORTDATA_API_KEY").context("SPORTDATA_API_KEY must be set")?;

        let base_url =
            env::var("SPORTDATA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let table_name =
            env::var("STATS_TABLE_NAME").context("STATS_TABLE_NAME must be set")?;
        if table_name.trim().is_empty() {
            return Err(anyhow!("STATS_TABLE_NAME must not be empty"));
        }

        let season = env::var("NBA_SEASON").unwrap_or_else(|_| DEFAULT_SEASON.to_string());

        let log_dir = env::var("STATS_LOG_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty());

        Ok(Self {
            api_key,
            base_url,
            database_url,
            table_name,
            season,
            log_dir,
        })
    }
}
