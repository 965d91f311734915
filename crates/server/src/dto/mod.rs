use chrono::NaiveDate;
use railseat::inventory::{Assignment, SeatClass};
use serde::{Deserialize, Serialize};

/// Response wrapper shared with the rest of the platform:
/// `status` 1 on success, 0 on any rejection, with a human-readable `msg`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u8,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            status: 1,
            msg: msg.into(),
            data: Some(data),
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            status: 0,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Shared request body of both inventory endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelQuery {
    pub travel_date: NaiveDate,
    pub train_number: String,
    pub start_station: String,
    pub dest_station: String,
    pub seat_type: u32,
}

/// The assigned ticket handed back to the booking workflow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub start_station: String,
    pub dest_station: String,
    pub seat_number: u32,
    pub seat_class: u32,
}

impl TicketDto {
    pub fn new(query: &TravelQuery, assignment: &Assignment, class: SeatClass) -> Self {
        Self {
            start_station: query.start_station.clone(),
            dest_station: query.dest_station.clone(),
            seat_number: assignment.seat,
            seat_class: class.type_code(),
        }
    }
}
