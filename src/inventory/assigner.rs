use thiserror::Error;
use tracing::debug;

use crate::{
    inventory::{SoldTicket, is_released},
    route::{Interval, Route},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("No seat left for the requested interval")]
    NoSeatAvailable,
}

/// The seat number picked for a new ticket, and whether it was freed by a
/// passenger alighting before the new boarding point or counted off fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub seat: u32,
    pub reused: bool,
}

/// Picks a seat number in `[1, capacity]` for a new ticket on `interval`.
///
/// Released seats are preferred: when any sold ticket's passenger has already
/// alighted at or before the new boarding point, the smallest such seat
/// number is handed out again. Otherwise the smallest number not held by a
/// conflicting ticket is used. Conflicting tickets block their seat for the
/// whole requested interval, even when the true overlap is partial.
///
/// Nothing is persisted here; the caller owns writing the chosen number to
/// the order store and must re-run against a fresh snapshot on retry.
pub fn assign_seat(
    capacity: u32,
    route: &Route,
    interval: &Interval,
    sold: &[SoldTicket],
) -> Result<Assignment, self::Error> {
    let mut reusable: Option<u32> = None;
    let mut occupied: Vec<u32> = Vec::new();
    for ticket in sold {
        if is_released(route, ticket, interval) {
            if ticket.seat < reusable.unwrap_or(u32::MAX) {
                reusable = Some(ticket.seat);
            }
        } else {
            occupied.push(ticket.seat);
        }
    }

    if let Some(seat) = reusable {
        debug!(seat, "Reusing a freed seat");
        return Ok(Assignment { seat, reused: true });
    }

    occupied.sort_unstable();
    for seat in 1..=capacity {
        if occupied.binary_search(&seat).is_err() {
            debug!(seat, "Assigning a fresh seat");
            return Ok(Assignment {
                seat,
                reused: false,
            });
        }
    }
    Err(self::Error::NoSeatAvailable)
}
