use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod assigner;
mod availability;
pub use assigner::*;
pub use availability::*;

use crate::route::{Interval, Route};

/// Comfort and economy seats live in independent numbering spaces with
/// independent capacities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatClass {
    Comfort,
    #[default]
    Economy,
}

impl SeatClass {
    /// Wire value `2` means comfort class; every other value is sold as
    /// economy. The code itself is not validated.
    pub const fn from_type_code(code: u32) -> Self {
        match code {
            2 => Self::Comfort,
            _ => Self::Economy,
        }
    }

    pub const fn type_code(&self) -> u32 {
        match self {
            Self::Comfort => 2,
            Self::Economy => 3,
        }
    }
}

/// A ticket already sold for a trip, as seen in the order store's snapshot.
/// Only the alighting station is recorded; the boarding station is not part
/// of the snapshot this core receives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoldTicket {
    pub destination: Arc<str>,
    pub seat: u32,
    pub class: SeatClass,
}

impl SoldTicket {
    pub fn new(destination: impl Into<Arc<str>>, seat: u32, class: SeatClass) -> Self {
        Self {
            destination: destination.into(),
            seat,
            class,
        }
    }
}

/// Per-class maximum number of concurrently occupied seats on a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub comfort: u32,
    pub economy: u32,
}

impl Capacity {
    pub const fn for_class(&self, class: SeatClass) -> u32 {
        match class {
            SeatClass::Comfort => self.comfort,
            SeatClass::Economy => self.economy,
        }
    }
}

/// A sold ticket no longer occupies its seat for a requested interval once
/// its passenger has alighted at or before the new boarding point.
///
/// A destination that cannot be resolved on the route keeps the ticket
/// conflicting; the snapshot is never trusted over the route topology.
pub fn is_released(route: &Route, ticket: &SoldTicket, interval: &Interval) -> bool {
    match route.index_of(&ticket.destination) {
        Ok(destination) => destination <= interval.start,
        Err(_) => false,
    }
}
