use minichess_core::logic::game::GameSession;
use shared::GameStateView;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// One registered game.
///
/// `session` is held for the whole of a request, including an engine
/// search. `view` is the last published state so that readers never wait
/// on a running search.
pub struct SessionEntry {
    pub game_id: String,
    pub session: Arc<Mutex<GameSession>>,
    view: RwLock<GameStateView>,
    ai_thinking: AtomicBool,
}

impl SessionEntry {
    pub fn new(game_id: String, session: GameSession) -> Self {
        let view = GameStateView::from_session(&game_id, &session, false);
        Self {
            game_id,
            session: Arc::new(Mutex::new(session)),
            view: RwLock::new(view),
            ai_thinking: AtomicBool::new(false),
        }
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.ai_thinking.load(Ordering::Acquire)
    }

    pub fn set_ai_thinking(&self, thinking: bool) {
        self.ai_thinking.store(thinking, Ordering::Release);
    }

    /// Refreshes the published view from `session` and returns it.
    pub async fn publish(&self, session: &GameSession) -> GameStateView {
        let view = GameStateView::from_session(&self.game_id, session, self.is_ai_thinking());
        *self.view.write().await = view.clone();
        view
    }

    pub async fn snapshot(&self) -> GameStateView {
        let mut view = self.view.read().await.clone();
        view.ai_thinking = self.is_ai_thinking();
        view
    }
}
