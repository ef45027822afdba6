// Shared models for the NBA stats pipeline services
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::transform::floats_to_decimals;

/// One team's row from the sportsdata.io standings endpoint.
///
/// Transient - lives only for the duration of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TeamStanding {
    #[serde(rename = "TeamID")]
    pub team_id: i64,
    pub key: String,
    pub city: String,
    pub name: String,
    pub conference: String,
    pub division: String,
    pub wins: i64,
    pub losses: i64,
    pub percentage: f64,
    pub points_per_game_for: f64,
    pub points_per_game_against: f64,
    pub home_wins: i64,
    pub home_losses: i64,
    pub away_wins: i64,
    pub away_losses: i64,
    pub last_ten_wins: i64,
    pub last_ten_losses: i64,
}

impl TeamStanding {
    /// Full display name, e.g. "Boston Celtics".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.city, self.name)
    }

    /// The numeric performance fields, as the raw JSON sub-object that gets
    /// decimal-converted before persisting.
    fn raw_stats(&self) -> Value {
        json!({
            "Wins": self.wins,
            "Losses": self.losses,
            "Percentage": self.percentage,
            "PointsPerGameFor": self.points_per_game_for,
            "PointsPerGameAgainst": self.points_per_game_against,
            "HomeWins": self.home_wins,
            "HomeLosses": self.home_losses,
            "AwayWins": self.away_wins,
            "AwayLosses": self.away_losses,
            "LastTenWins": self.last_ten_wins,
            "LastTenLosses": self.last_ten_losses,
        })
    }
}

/// One persisted standings snapshot.
///
/// Composite-keyed by (team_id, timestamp) and never mutated after write, so
/// history accumulates run over run instead of overwriting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatsItem {
    pub team_id: i64,
    /// Capture time (ISO-8601), shared by every item in one batch.
    pub timestamp: String,
    pub team_key: String,
    pub team_name: String,
    pub conference: String,
    pub division: String,
    /// Numeric stats with every float replaced by an exact decimal string.
    pub stats: Value,
    pub last_updated: String,
}

impl TeamStatsItem {
    /// Build the storage item for one standings row.
    ///
    /// `captured_at` stamps both the key and `last_updated`, so a single run
    /// carries exactly one instant.
    pub fn from_standing(team: &TeamStanding, captured_at: &str) -> Self {
        Self {
            team_id: team.team_id,
            timestamp: captured_at.to_string(),
            team_key: team.key.clone(),
            team_name: team.full_name(),
            conference: team.conference.clone(),
            division: team.division.clone(),
            stats: floats_to_decimals(team.raw_stats()),
            last_updated: captured_at.to_string(),
        }
    }
}
