use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::error_response,
    dto::{Envelope, TravelQuery},
    state::AppState,
};

pub async fn availability(
    State(state): State<Arc<AppState>>,
    Json(query): Json<TravelQuery>,
) -> impl IntoResponse {
    debug!(train = %query.train_number, "Availability query");
    match state.allocator.availability(&(&query).into()).await {
        Ok(count) => (
            StatusCode::OK,
            Json(Envelope::ok("Tickets available", count)),
        ),
        Err(error) => {
            let (status, msg) = error_response(&error);
            (status, Json(Envelope::fail(msg)))
        }
    }
}
