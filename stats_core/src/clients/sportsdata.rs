use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use tracing::{error, info};

use crate::models::TeamStanding;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Client for the sportsdata.io NBA endpoints.
#[derive(Debug, Clone)]
pub struct SportsDataClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SportsDataClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetch the standings for one season.
    ///
    /// Single attempt, transport-default timeout. The season token is passed
    /// through verbatim. Transport errors, non-success statuses and parse
    /// failures are logged and collapsed into `None` so the caller can treat
    /// them uniformly as "no data".
    pub async fn fetch_standings(&self, season: &str) -> Option<Vec<TeamStanding>> {
        let url = format!("{}/scores/json/Standings/{}", self.base_url, season);
        info!(url = %url, season = %season, "Fetching standings from API");

        match self.try_fetch(&url).await {
            Ok(teams) => {
                info!(
                    teams_count = teams.len(),
                    season = %season,
                    "Successfully fetched standings"
                );
                Some(teams)
            }
            Err(e) => {
                error!(error = %e, url = %url, season = %season, "Standings request failed");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Vec<TeamStanding>> {
        let resp = self
            .client
            .get(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .send()
            .await
            .context("standings request failed")?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("standings request returned HTTP {}", status));
        }

        resp.json::<Vec<TeamStanding>>()
            .await
            .context("failed to parse standings response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on an ephemeral port and
    /// return the base URL pointing at it.
    async fn spawn_stub(status_line: &str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    fn standing_json(team_id: i64, key: &str, city: &str, name: &str) -> serde_json::Value {
        json!({
            "TeamID": team_id, "Key": key, "City": city, "Name": name,
            "Conference": "East", "Division": "Atlantic",
            "Wins": 50, "Losses": 32, "Percentage": 0.6097,
            "PointsPerGameFor": 117.9, "PointsPerGameAgainst": 111.4,
            "HomeWins": 30, "HomeLosses": 11, "AwayWins": 20, "AwayLosses": 21,
            "LastTenWins": 7, "LastTenLosses": 3
        })
    }

    #[tokio::test]
    async fn test_fetch_returns_all_records_on_success() {
        let body = json!([
            standing_json(1, "BOS", "Boston", "Celtics"),
            standing_json(2, "NY", "New York", "Knicks"),
        ])
        .to_string();
        let base_url = spawn_stub("200 OK", body).await;

        let client = SportsDataClient::new(&base_url, "test-key");
        let standings = client.fetch_standings("2024").await;

        let standings = standings.expect("expected standings");
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].full_name(), "Boston Celtics");
        assert_eq!(standings[1].key, "NY");
    }

    #[tokio::test]
    async fn test_fetch_returns_none_on_http_error() {
        let base_url = spawn_stub("404 Not Found", "{}".to_string()).await;

        let client = SportsDataClient::new(&base_url, "test-key");
        assert!(client.fetch_standings("2024").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_returns_none_on_connection_error() {
        // Bind then drop so the port is known-dead.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = SportsDataClient::new(&base_url, "test-key");
        assert!(client.fetch_standings("2024").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_returns_none_on_malformed_body() {
        let base_url = spawn_stub("200 OK", "not json".to_string()).await;

        let client = SportsDataClient::new(&base_url, "test-key");
        assert!(client.fetch_standings("2024").await.is_none());
    }
}
