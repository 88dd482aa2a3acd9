//! REST client for the team/player backend

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::{Player, PlayerStat, Team, TeamStat};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

const USER_AGENT: &str = concat!("rosterdesk/", env!("CARGO_PKG_VERSION"));

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("invalid API url '{0}'")]
    InvalidUrl(String),
}

// ============================================================================
// Request payloads
// ============================================================================

/// Body of a team create/update
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TeamPayload {
    pub team_name: String,
    pub coach_name: String,
    pub founded_year: Option<i64>,
    pub city: String,
    pub stadium: String,
}

/// Body of a player create/update
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlayerPayload {
    pub first_name: String,
    pub last_name: String,
    pub team_id: Option<i64>,
    pub position: String,
    pub jersey_number: i64,
    pub age: i64,
    pub height: f64,
    pub weight: f64,
    pub ranking: i64,
    pub goals: i64,
    pub assists: i64,
    pub matches_played: i64,
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Debug, Deserialize)]
struct WriteResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamResponse {
    team_id: i64,
    team_name: String,
    coach_name: Option<String>,
    founded_year: Option<i64>,
    city: Option<String>,
    stadium: Option<String>,
    created_at: Option<String>,
}

impl From<TeamResponse> for Team {
    fn from(raw: TeamResponse) -> Self {
        Team {
            team_id: raw.team_id,
            team_name: raw.team_name,
            coach_name: raw.coach_name,
            founded_year: raw.founded_year,
            city: raw.city,
            stadium: raw.stadium,
            created_at: raw.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    player_id: i64,
    first_name: String,
    last_name: String,
    team_id: Option<i64>,
    team_name: Option<String>,
    position: Option<String>,
    jersey_number: Option<i64>,
    age: Option<i64>,
    height: Option<f64>,
    weight: Option<f64>,
    ranking: Option<i64>,
    goals: Option<i64>,
    assists: Option<i64>,
    matches_played: Option<i64>,
    created_at: Option<String>,
}

impl From<PlayerResponse> for Player {
    fn from(raw: PlayerResponse) -> Self {
        Player {
            player_id: raw.player_id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            team_id: raw.team_id,
            team_name: raw.team_name,
            position: raw.position,
            jersey_number: raw.jersey_number.unwrap_or_default(),
            age: raw.age.unwrap_or_default(),
            height: raw.height.unwrap_or_default(),
            weight: raw.weight.unwrap_or_default(),
            ranking: raw.ranking.unwrap_or_default(),
            goals: raw.goals.unwrap_or_default(),
            assists: raw.assists.unwrap_or_default(),
            matches_played: raw.matches_played.unwrap_or_default(),
            created_at: raw.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlayerStatResponse {
    player_id: i64,
    player_name: String,
    team_name: Option<String>,
    position: Option<String>,
    jersey_number: Option<i64>,
    age: Option<i64>,
    ranking: Option<i64>,
    goals: Option<i64>,
    assists: Option<i64>,
    matches_played: Option<i64>,
    goals_per_match: Option<f64>,
}

impl From<PlayerStatResponse> for PlayerStat {
    fn from(raw: PlayerStatResponse) -> Self {
        PlayerStat {
            player_id: raw.player_id,
            player_name: raw.player_name,
            team_name: raw.team_name,
            position: raw.position,
            jersey_number: raw.jersey_number.unwrap_or_default(),
            age: raw.age.unwrap_or_default(),
            ranking: raw.ranking.unwrap_or_default(),
            goals: raw.goals.unwrap_or_default(),
            assists: raw.assists.unwrap_or_default(),
            matches_played: raw.matches_played.unwrap_or_default(),
            goals_per_match: raw.goals_per_match.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamStatResponse {
    team_id: i64,
    team_name: String,
    coach_name: Option<String>,
    city: Option<String>,
    total_players: Option<i64>,
    total_goals: Option<i64>,
    total_assists: Option<i64>,
}

impl From<TeamStatResponse> for TeamStat {
    fn from(raw: TeamStatResponse) -> Self {
        TeamStat {
            team_id: raw.team_id,
            team_name: raw.team_name,
            coach_name: raw.coach_name,
            city: raw.city,
            total_players: raw.total_players.unwrap_or_default(),
            total_goals: raw.total_goals.unwrap_or_default(),
            total_assists: raw.total_assists.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Thin wrapper over a pooled `reqwest::Client` bound to one backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = check_status(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn get_list<R, T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let raw: Vec<R> = self.get_json(path).await?;
        Ok(raw.into_iter().map(T::from).collect())
    }

    /// Send a write and unwrap the `{success, message}` envelope.
    async fn write(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = check_status(request.send().await?).await?;
        let body: WriteResponse = response.json().await?;
        if body.success {
            Ok(body.message)
        } else {
            Err(ApiError::Rejected(body.message))
        }
    }

    // ===== Teams =====

    pub async fn list_teams(&self) -> Result<Vec<Team>, ApiError> {
        self.get_list::<TeamResponse, _>("/api/teams").await
    }

    pub async fn get_team(&self, id: i64) -> Result<Team, ApiError> {
        let raw: TeamResponse = self.get_json(&format!("/api/teams/{id}")).await?;
        Ok(raw.into())
    }

    pub async fn create_team(&self, payload: &TeamPayload) -> Result<String, ApiError> {
        debug!(team = %payload.team_name, "POST team");
        self.write(self.client.post(self.url("/api/teams")).json(payload))
            .await
    }

    pub async fn update_team(&self, id: i64, payload: &TeamPayload) -> Result<String, ApiError> {
        debug!(id, team = %payload.team_name, "PUT team");
        self.write(
            self.client
                .put(self.url(&format!("/api/teams/{id}")))
                .json(payload),
        )
        .await
    }

    pub async fn delete_team(&self, id: i64) -> Result<String, ApiError> {
        debug!(id, "DELETE team");
        self.write(self.client.delete(self.url(&format!("/api/teams/{id}"))))
            .await
    }

    pub async fn team_players(&self, id: i64) -> Result<Vec<Player>, ApiError> {
        self.get_list::<PlayerResponse, _>(&format!("/api/teams/{id}/players"))
            .await
    }

    // ===== Players =====

    pub async fn list_players(&self) -> Result<Vec<Player>, ApiError> {
        self.get_list::<PlayerResponse, _>("/api/players").await
    }

    pub async fn get_player(&self, id: i64) -> Result<Player, ApiError> {
        let raw: PlayerResponse = self.get_json(&format!("/api/players/{id}")).await?;
        Ok(raw.into())
    }

    pub async fn create_player(&self, payload: &PlayerPayload) -> Result<String, ApiError> {
        debug!(first = %payload.first_name, last = %payload.last_name, "POST player");
        self.write(self.client.post(self.url("/api/players")).json(payload))
            .await
    }

    pub async fn update_player(
        &self,
        id: i64,
        payload: &PlayerPayload,
    ) -> Result<String, ApiError> {
        debug!(id, "PUT player");
        self.write(
            self.client
                .put(self.url(&format!("/api/players/{id}")))
                .json(payload),
        )
        .await
    }

    pub async fn delete_player(&self, id: i64) -> Result<String, ApiError> {
        debug!(id, "DELETE player");
        self.write(self.client.delete(self.url(&format!("/api/players/{id}"))))
            .await
    }

    pub async fn top_players(&self, limit: usize) -> Result<Vec<Player>, ApiError> {
        self.get_list::<PlayerResponse, _>(&format!("/api/players/top/{limit}"))
            .await
    }

    pub async fn search_players(&self, term: &str) -> Result<Vec<Player>, ApiError> {
        let path = format!("/api/players/search?q={}", urlencoding::encode(term));
        self.get_list::<PlayerResponse, _>(&path).await
    }

    // ===== Stats =====

    pub async fn player_stats(&self) -> Result<Vec<PlayerStat>, ApiError> {
        self.get_list::<PlayerStatResponse, _>("/api/stats/players")
            .await
    }

    pub async fn team_stats(&self) -> Result<Vec<TeamStat>, ApiError> {
        self.get_list::<TeamStatResponse, _>("/api/stats/teams").await
    }

    // ===== Bulk =====

    pub async fn load_sample_data(&self) -> Result<String, ApiError> {
        debug!("POST sample data");
        self.write(self.client.post(self.url("/api/sample-data")))
            .await
    }

    pub async fn clear_data(&self) -> Result<String, ApiError> {
        debug!("DELETE all data");
        self.write(self.client.delete(self.url("/api/clear-data")))
            .await
    }
}

/// Validate the base URL and strip any trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|_| ApiError::InvalidUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:5000/").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(
            normalize_base_url(" https://example.com/sports ").unwrap(),
            "https://example.com/sports"
        );
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn player_nulls_default_to_zero() {
        let raw: PlayerResponse = serde_json::from_str(
            r#"{"player_id": 4, "first_name": "Ada", "last_name": "Kane",
                "team_id": null, "jersey_number": null, "height": 1.8}"#,
        )
        .unwrap();
        let player = Player::from(raw);

        assert_eq!(player.team_id, None);
        assert_eq!(player.jersey_number, 0);
        assert_eq!(player.goals, 0);
        assert_eq!(player.height, 1.8);
    }

    #[test]
    fn player_payload_serializes_null_team() {
        let payload = PlayerPayload {
            first_name: "Ada".into(),
            last_name: "Kane".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["team_id"], serde_json::Value::Null);
        assert_eq!(json["jersey_number"], 0);
    }
}
