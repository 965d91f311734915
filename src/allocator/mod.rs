mod claims;
pub use claims::*;

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    inventory::{
        self, Assignment, AvailabilityPolicy, DirectProportionBlend, SeatClass, assign_seat,
        remaining_seats,
    },
    provider::{CapacityProvider, ProportionProvider, RouteProvider, TicketProvider},
    route,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Route(#[from] route::Error),
    #[error(transparent)]
    Upstream(#[from] crate::provider::Error),
    #[error(transparent)]
    Seat(#[from] inventory::Error),
}

/// One availability query or seat request.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub train_number: Arc<str>,
    pub travel_date: NaiveDate,
    pub from: Arc<str>,
    pub to: Arc<str>,
    pub class: SeatClass,
}

/// Entry point of the inventory core. Owns the provider seams and a claims
/// registry; holds no inventory state of its own, every answer is computed
/// from a snapshot fetched for that call.
pub struct Allocator {
    routes: Arc<dyn RouteProvider>,
    tickets: Arc<dyn TicketProvider>,
    capacities: Arc<dyn CapacityProvider>,
    proportions: Arc<dyn ProportionProvider>,
    policy: Box<dyn AvailabilityPolicy>,
    claims: SeatClaims,
}

impl Allocator {
    pub fn new(
        routes: Arc<dyn RouteProvider>,
        tickets: Arc<dyn TicketProvider>,
        capacities: Arc<dyn CapacityProvider>,
        proportions: Arc<dyn ProportionProvider>,
    ) -> Self {
        Self {
            routes,
            tickets,
            capacities,
            proportions,
            policy: Box::new(DirectProportionBlend),
            claims: SeatClaims::new(),
        }
    }

    /// Swaps the availability blend. The default reserves a configured share
    /// of capacity for full-span riders.
    pub fn with_policy(mut self, policy: impl AvailabilityPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// How many more tickets of the requested class can be sold on the
    /// requested interval.
    ///
    /// Station and interval validation runs before any snapshot fetch; a
    /// request naming an unknown station never touches the other services.
    pub async fn availability(&self, request: &BookingRequest) -> Result<u32, self::Error> {
        let route = self.routes.route(&request.train_number).await?;
        let interval = route.interval(&request.from, &request.to)?;

        let sold = self.class_snapshot(request).await?;
        let capacity = self.capacities.capacity(&request.train_number).await?;
        let proportion = self.proportions.proportion().await?;

        let remaining = remaining_seats(
            capacity.for_class(request.class),
            &route,
            &interval,
            &sold,
            proportion,
            self.policy.as_ref(),
        );
        debug!(
            train = %request.train_number,
            date = %request.travel_date,
            remaining,
            "Availability computed"
        );
        Ok(remaining)
    }

    /// Picks a concrete seat number for a new ticket.
    ///
    /// Serialized per (train, date, class) inside this process, so two
    /// concurrent requests here cannot be granted the same seat from the
    /// same snapshot. The chosen number is not persisted by this core; until
    /// the order store accepts the claim, another process can still observe
    /// the old snapshot and pick the same seat. The store's claim write has
    /// to reject the loser.
    pub async fn assign(&self, request: &BookingRequest) -> Result<Assignment, self::Error> {
        let route = self.routes.route(&request.train_number).await?;
        let interval = route.interval(&request.from, &request.to)?;

        let _claim = self
            .claims
            .lock(&request.train_number, request.travel_date, request.class)
            .await;

        let sold = self.class_snapshot(request).await?;
        let capacity = self.capacities.capacity(&request.train_number).await?;

        let assignment = assign_seat(capacity.for_class(request.class), &route, &interval, &sold)?;
        info!(
            train = %request.train_number,
            date = %request.travel_date,
            seat = assignment.seat,
            reused = assignment.reused,
            "Seat assigned"
        );
        Ok(assignment)
    }

    /// Sold tickets of the requested class only; other classes number their
    /// seats independently and never conflict.
    async fn class_snapshot(
        &self,
        request: &BookingRequest,
    ) -> Result<Vec<inventory::SoldTicket>, self::Error> {
        let mut sold = self
            .tickets
            .sold_tickets(&request.train_number, request.travel_date)
            .await?;
        sold.retain(|ticket| ticket.class == request.class);
        Ok(sold)
    }
}
