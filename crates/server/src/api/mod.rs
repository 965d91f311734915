mod availability;
mod seat;

pub use availability::*;
pub use seat::*;

use axum::http::StatusCode;
use railseat::allocator::{BookingRequest, Error};

use crate::dto::TravelQuery;

impl From<&TravelQuery> for BookingRequest {
    fn from(query: &TravelQuery) -> Self {
        Self {
            train_number: query.train_number.as_str().into(),
            travel_date: query.travel_date,
            from: query.start_station.as_str().into(),
            to: query.dest_station.as_str().into(),
            class: railseat::inventory::SeatClass::from_type_code(query.seat_type),
        }
    }
}

/// Business rejections keep the envelope contract (200 with `status: 0`);
/// only an unreachable upstream turns into a transport-level failure.
pub fn error_response(error: &Error) -> (StatusCode, String) {
    match error {
        Error::Upstream(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
        Error::Route(e) => (StatusCode::OK, e.to_string()),
        Error::Seat(e) => (StatusCode::OK, e.to_string()),
    }
}
