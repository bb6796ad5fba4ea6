use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use minichess_core::GameError;
use shared::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no game with id {0}")]
    UnknownSession(String),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("engine worker failed: {0}")]
    Worker(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownSession(_) => StatusCode::NOT_FOUND,
            Self::Game(err) => match err {
                GameError::InvalidSquare { .. }
                | GameError::InvalidDepth(_)
                | GameError::IllegalMove { .. }
                | GameError::NoSelection => StatusCode::BAD_REQUEST,
                GameError::GameAlreadyOver | GameError::NotAiTurn(_) => StatusCode::CONFLICT,
                GameError::SearchInvariantViolation => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
