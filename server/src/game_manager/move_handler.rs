use crate::error::ApiError;
use crate::game_manager::{AppState, SessionEntry};
use minichess_core::logic::board::Square;
use minichess_core::logic::game::GameSession;
use minichess_core::GameError;
use shared::{GameStateView, MoveRequest, SelectRequest};

impl AppState {
    pub async fn select(
        &self,
        game_id: &str,
        req: SelectRequest,
    ) -> Result<GameStateView, ApiError> {
        let square = Square::try_from((req.row, req.col))?;
        let entry = self.entry(game_id)?;
        let mut session = entry.session.lock().await;

        let result = session.select(square);
        settle(&entry, &session, result).await
    }

    pub async fn make_move(
        &self,
        game_id: &str,
        req: MoveRequest,
    ) -> Result<GameStateView, ApiError> {
        let from = Square::try_from((req.start_row, req.start_col))?;
        let to = Square::try_from((req.end_row, req.end_col))?;
        let entry = self.entry(game_id)?;
        let mut session = entry.session.lock().await;

        let result = session.make_move(from, to).map(|mv| {
            tracing::debug!(game_id = %game_id, from = %mv.from, to = %mv.to, "Move played");
        });
        settle(&entry, &session, result).await
    }

    /// Runs the search on the blocking pool while this game's lock is held.
    pub async fn ai_move(&self, game_id: &str) -> Result<GameStateView, ApiError> {
        let entry = self.entry(game_id)?;
        let mut session = entry.session.clone().lock_owned().await;

        entry.set_ai_thinking(true);
        let joined = tokio::task::spawn_blocking(move || {
            let result = session.ai_move();
            (session, result)
        })
        .await;
        entry.set_ai_thinking(false);

        let (session, result) = joined.map_err(|err| {
            tracing::error!(game_id = %game_id, error = %err, "Engine worker panicked");
            ApiError::Worker(err.to_string())
        })?;

        let result = result.map(|search| {
            tracing::info!(
                game_id = %game_id,
                nodes = search.nodes_evaluated,
                score = search.score,
                "Engine moved"
            );
        });
        settle(&entry, &session, result).await
    }
}

/// Publishes the session state and maps the outcome of a request.
/// Recoverable rejections are answered with the (unchanged) state.
async fn settle(
    entry: &SessionEntry,
    session: &GameSession,
    result: Result<(), GameError>,
) -> Result<GameStateView, ApiError> {
    let view = entry.publish(session).await;
    match result {
        Ok(()) => {
            if view.game_over {
                tracing::info!(game_id = %entry.game_id, message = %view.message, "Game over");
            }
            Ok(view)
        }
        Err(err) if err.is_recoverable() => {
            tracing::debug!(game_id = %entry.game_id, error = %err, "Request rejected");
            Ok(view)
        }
        Err(err @ GameError::SearchInvariantViolation) => {
            tracing::error!(game_id = %entry.game_id, error = %err, "Engine found no move");
            Err(err.into())
        }
        Err(err) => {
            tracing::warn!(game_id = %entry.game_id, error = %err, "Request refused");
            Err(err.into())
        }
    }
}
