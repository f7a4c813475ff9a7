//! Client for the external records service that creates game rows,
//! assigns colors and stores match results.

use futures::future::BoxFuture;
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::RecordsError;
use crate::models::messages::{GameRecord, PlayerInfo, UserId};

pub trait RecordsService: Send + Sync {
    /// Creates a game for two players. The service picks who plays white.
    fn create_game<'a>(
        &'a self,
        player_one: &'a PlayerInfo,
        player_two: &'a PlayerInfo,
    ) -> BoxFuture<'a, Result<GameRecord, RecordsError>>;

    fn update_game_result<'a>(
        &'a self,
        room_id: &'a str,
        winner_id: UserId,
    ) -> BoxFuture<'a, Result<(), RecordsError>>;
}

#[derive(Serialize)]
struct CreateGameBody<'a> {
    player_one: &'a PlayerInfo,
    player_two: &'a PlayerInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateGameResponse {
    game_data: GameRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateGameBody<'a> {
    room_id: &'a str,
    winner_id: UserId,
}

/// Records service reached over HTTP.
#[derive(Clone)]
pub struct HttpRecordsService {
    http_client: Client,
    base_url: String,
}

impl HttpRecordsService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RecordsError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post_create_game(
        &self,
        player_one: &PlayerInfo,
        player_two: &PlayerInfo,
    ) -> Result<GameRecord, RecordsError> {
        let url = format!("{}/api/create-game", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(&CreateGameBody {
                player_one,
                player_two,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("create-game returned {}", response.status());
            return Err(RecordsError::Status(response.status().as_u16()));
        }

        let body: CreateGameResponse = response
            .json()
            .await
            .map_err(|e| RecordsError::InvalidResponse(e.to_string()))?;
        info!(
            "Records service created game {} (white {}, black {})",
            body.game_data.id, body.game_data.white_player_id, body.game_data.black_player_id
        );
        Ok(body.game_data)
    }

    async fn put_game_result(&self, room_id: &str, winner_id: UserId) -> Result<(), RecordsError> {
        let url = format!("{}/api/update-game", self.base_url);
        let response = self
            .http_client
            .put(&url)
            .json(&UpdateGameBody { room_id, winner_id })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecordsError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

impl RecordsService for HttpRecordsService {
    fn create_game<'a>(
        &'a self,
        player_one: &'a PlayerInfo,
        player_two: &'a PlayerInfo,
    ) -> BoxFuture<'a, Result<GameRecord, RecordsError>> {
        Box::pin(self.post_create_game(player_one, player_two))
    }

    fn update_game_result<'a>(
        &'a self,
        room_id: &'a str,
        winner_id: UserId,
    ) -> BoxFuture<'a, Result<(), RecordsError>> {
        Box::pin(self.put_game_result(room_id, winner_id))
    }
}
