use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use railseat::inventory::SeatClass;
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::error_response,
    dto::{Envelope, TicketDto, TravelQuery},
    state::AppState,
};

pub async fn assign_seat(
    State(state): State<Arc<AppState>>,
    Json(query): Json<TravelQuery>,
) -> impl IntoResponse {
    debug!(train = %query.train_number, "Seat request");
    match state.allocator.assign(&(&query).into()).await {
        Ok(assignment) => {
            let msg = if assignment.reused {
                "Use the previous distributed seat"
            } else {
                "Use a new seat number"
            };
            let class = SeatClass::from_type_code(query.seat_type);
            let ticket = TicketDto::new(&query, &assignment, class);
            (StatusCode::OK, Json(Envelope::ok(msg, ticket)))
        }
        Err(error) => {
            let (status, msg) = error_response(&error);
            (status, Json(Envelope::fail(msg)))
        }
    }
}
