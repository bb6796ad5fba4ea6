use crate::error::ApiError;
use crate::game_manager::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use shared::{GameStateView, InitRequest, MoveRequest, SelectRequest};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

type ApiResult = Result<Json<GameStateView>, ApiError>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/game/init", post(init_game))
        .route("/game/:id/state", get(get_state))
        .route("/game/:id/select", post(select_piece))
        .route("/game/:id/move", post(make_move))
        .route("/game/:id/ai_move", post(ai_move))
        .route("/game/:id", delete(delete_game))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn init_game(State(state): State<Arc<AppState>>, Json(req): Json<InitRequest>) -> ApiResult {
    state.create_game(req).await.map(Json)
}

async fn get_state(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult {
    state.get_state(&id).await.map(Json)
}

async fn select_piece(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SelectRequest>,
) -> ApiResult {
    state.select(&id, req).await.map(Json)
}

async fn make_move(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> ApiResult {
    state.make_move(&id, req).await.map(Json)
}

async fn ai_move(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult {
    state.ai_move(&id).await.map(Json)
}

async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.remove_game(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
