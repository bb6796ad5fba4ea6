use crate::error::ApiError;
use crate::game_manager::{AppState, SessionEntry};
use minichess_core::logic::game::{GameConfig, GameSession};
use shared::{GameStateView, InitRequest};
use std::sync::Arc;
use uuid::Uuid;

impl AppState {
    pub async fn create_game(&self, req: InitRequest) -> Result<GameStateView, ApiError> {
        let config = GameConfig {
            mode: req.mode,
            depth_white: req.ai_depth_white,
            depth_black: req.ai_depth_black,
        };
        let session = GameSession::with_engine_config(config, Arc::clone(&self.engine_config))
            .inspect_err(|err| tracing::warn!(error = %err, "Rejected game config"))?;

        let game_id = Uuid::new_v4().to_string();
        let entry = Arc::new(SessionEntry::new(game_id.clone(), session));
        let view = entry.snapshot().await;
        self.games.insert(game_id.clone(), entry);

        tracing::info!(
            game_id = %game_id,
            mode = ?config.mode,
            depth_white = config.depth_white,
            depth_black = config.depth_black,
            "Game created"
        );
        Ok(view)
    }

    /// Served from the published view, so it answers while a search runs.
    pub async fn get_state(&self, game_id: &str) -> Result<GameStateView, ApiError> {
        let entry = self.entry(game_id)?;
        Ok(entry.snapshot().await)
    }

    pub fn remove_game(&self, game_id: &str) -> Result<(), ApiError> {
        self.games
            .remove(game_id)
            .map(|_| tracing::info!(game_id = %game_id, "Game removed"))
            .ok_or_else(|| ApiError::UnknownSession(game_id.to_string()))
    }
}
