//! Stats table provisioning and batch writes.
//!
//! One row per (team_id, ts) pair. Rows are append-only: every pipeline run
//! inserts a fresh snapshot under its own capture timestamp, so history
//! accumulates and prior runs are never overwritten.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info};

use super::StatsRepository;
use crate::models::{TeamStanding, TeamStatsItem};

/// Items per INSERT statement (the store's per-request batch limit).
const WRITE_CHUNK_SIZE: usize = 25;

/// SQLSTATE for "relation already exists".
const DUPLICATE_TABLE: &str = "42P07";

/// Postgres-backed stats store keyed by (team_id, ts).
#[derive(Debug, Clone)]
pub struct StatsStore {
    pool: PgPool,
    table_name: String,
}

impl StatsStore {
    /// The table name is interpolated into DDL/DML (identifiers cannot be
    /// bound), so anything that is not a bare SQL identifier is rejected
    /// up front as a configuration error.
    pub fn new(pool: PgPool, table_name: &str) -> Result<Self> {
        if !is_valid_table_name(table_name) {
            return Err(anyhow!("invalid stats table name: {:?}", table_name));
        }
        Ok(Self {
            pool,
            table_name: table_name.to_string(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn insert_chunk(&self, items: &[TeamStatsItem]) -> Result<()> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} \
             (team_id, ts, team_key, team_name, conference, division, stats, last_updated) ",
            self.table_name
        ));

        builder.push_values(items.iter(), |mut row, item| {
            debug!(team_name = %item.team_name, "Storing team snapshot");
            row.push_bind(item.team_id)
                .push_bind(&item.timestamp)
                .push_bind(&item.team_key)
                .push_bind(&item.team_name)
                .push_bind(&item.conference)
                .push_bind(&item.division)
                .push_bind(&item.stats)
                .push_bind(&item.last_updated);
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .context("stats batch insert failed")?;
        Ok(())
    }
}

#[async_trait]
impl StatsRepository for StatsStore {
    async fn ensure_table(&self) -> Result<()> {
        info!(table_name = %self.table_name, "Setting up stats table");

        let ddl = format!(
            "CREATE TABLE {} (\
                 team_id      BIGINT NOT NULL, \
                 ts           TEXT   NOT NULL, \
                 team_key     TEXT   NOT NULL, \
                 team_name    TEXT   NOT NULL, \
                 conference   TEXT   NOT NULL, \
                 division     TEXT   NOT NULL, \
                 stats        JSONB  NOT NULL, \
                 last_updated TEXT   NOT NULL, \
                 PRIMARY KEY (team_id, ts)\
             )",
            self.table_name
        );

        match sqlx::query(&ddl).execute(&self.pool).await {
            Ok(_) => {
                info!(table_name = %self.table_name, "Created stats table");
                Ok(())
            }
            Err(e) if is_duplicate_table(&e) => {
                info!(table_name = %self.table_name, "Stats table already exists");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, table_name = %self.table_name, "Failed to set up stats table");
                Err(e).context("failed to set up stats table")
            }
        }
    }

    async fn put_team_stats(&self, standings: &[TeamStanding]) -> Result<usize> {
        let captured_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let items = build_items(standings, &captured_at);

        info!(teams_count = items.len(), "Starting batch write of team stats");

        // A failing chunk aborts the rest; chunks already written stay
        // (no cross-batch transaction).
        for chunk in items.chunks(WRITE_CHUNK_SIZE) {
            if let Err(e) = self.insert_chunk(chunk).await {
                error!(error = %e, error_kind = "store_write", "Failed to store team stats");
                return Err(e);
            }
        }

        info!(teams_count = items.len(), "Successfully stored team stats");
        Ok(items.len())
    }
}

/// Map standings to storage items, all stamped with the same capture time.
fn build_items(standings: &[TeamStanding], captured_at: &str) -> Vec<TeamStatsItem> {
    standings
        .iter()
        .map(|team| TeamStatsItem::from_standing(team, captured_at))
        .collect()
}

fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_duplicate_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(DUPLICATE_TABLE),
        _ => false,
    }
}
