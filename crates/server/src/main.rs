mod api;
mod dto;
mod state;
mod upstream;

use crate::{state::AppState, upstream::UpstreamConfig};
use axum::routing::post;
use std::sync::Arc;
use tracing::info;

const PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let config = UpstreamConfig::from_env();
    info!(?config, "Upstream services");
    let state = Arc::new(AppState::new(config));

    let app = axum::Router::new()
        .route("/inventory/availability", post(api::availability))
        .route("/inventory/seat", post(api::assign_seat))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT))
        .await
        .unwrap();
    info!("Listening to port {PORT}");
    axum::serve(listener, app).await.unwrap();
}
