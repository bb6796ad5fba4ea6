use crate::error::ApiError;
use dashmap::DashMap;
use minichess_core::engine::config::EngineConfig;
use std::sync::Arc;

pub mod lifecycle;
pub mod move_handler;
pub mod session;

pub use session::SessionEntry;

/// Registry of live games, keyed by game id.
pub struct AppState {
    pub games: DashMap<String, Arc<SessionEntry>>,
    pub engine_config: Arc<EngineConfig>,
}

impl AppState {
    pub fn new(engine_config: Arc<EngineConfig>) -> Self {
        Self {
            games: DashMap::new(),
            engine_config,
        }
    }

    /// Clones the entry out so no map shard stays locked across an await.
    fn entry(&self, game_id: &str) -> Result<Arc<SessionEntry>, ApiError> {
        self.games
            .get(game_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ApiError::UnknownSession(game_id.to_string()))
    }
}
