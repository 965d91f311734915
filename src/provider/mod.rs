//! Capability seams toward the services that own the truth.
//!
//! The core computes over data it never stores: the route topology, the
//! sold-ticket snapshot, the per-class capacity and the allocation
//! proportion all come from sibling services. Each one sits behind a small
//! trait so the server wires in HTTP clients while tests wire in fixtures.

use chrono::NaiveDate;
use std::{future::Future, pin::Pin};
use thiserror::Error;

use crate::{
    inventory::{Capacity, SoldTicket},
    route::Route,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream service unavailable: {0}")]
    Unavailable(String),
}

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

/// Which backing fleet a train number belongs to. The platform runs twin
/// order stores, one per fleet, and the leading character of the train
/// number decides which of them holds the sold tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainKind {
    HighSpeed,
    Regular,
}

impl TrainKind {
    pub fn of(train_number: &str) -> Self {
        match train_number.chars().next() {
            Some('G') | Some('D') => Self::HighSpeed,
            _ => Self::Regular,
        }
    }
}

/// Ordered station list for a train number.
pub trait RouteProvider: Send + Sync {
    fn route<'a>(&'a self, train_number: &'a str) -> ProviderFuture<'a, Route>;
}

/// Tickets already sold for a trip on a travel date.
pub trait TicketProvider: Send + Sync {
    fn sold_tickets<'a>(
        &'a self,
        train_number: &'a str,
        travel_date: NaiveDate,
    ) -> ProviderFuture<'a, Vec<SoldTicket>>;
}

/// Per-class seat counts of the train type serving a train number.
pub trait CapacityProvider: Send + Sync {
    fn capacity<'a>(&'a self, train_number: &'a str) -> ProviderFuture<'a, Capacity>;
}

/// The direct-allocation proportion, read fresh on every call so operators
/// can retune it without a redeploy.
pub trait ProportionProvider: Send + Sync {
    fn proportion(&self) -> ProviderFuture<'_, f64>;
}
