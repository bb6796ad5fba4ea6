use game_manager::AppState;
use minichess_core::engine::config::EngineConfig;
use std::{error::Error, net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

mod api;
mod error;
mod game_manager;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let engine_config = match std::env::var("MINICHESS_ENGINE_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            tracing::info!(path = %path, "Loaded engine config");
            EngineConfig::load_from_json(&json)?
        }
        Err(_) => EngineConfig::default(),
    };

    let state = Arc::new(AppState::new(Arc::new(engine_config)));
    let app = api::router(state);

    let addr: SocketAddr = std::env::var("MINICHESS_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
