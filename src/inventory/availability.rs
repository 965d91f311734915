use tracing::debug;

use crate::{
    inventory::{SoldTicket, is_released},
    route::{Interval, Route},
};

/// Everything a blend policy gets to look at for one availability query.
#[derive(Debug, Clone, Copy)]
pub struct BlendInput {
    pub capacity: u32,
    /// Sold tickets still occupying their seat somewhere on the requested
    /// interval.
    pub conflicting: u32,
    /// Configured share of the capacity reserved for origin-to-terminus
    /// riders, in `[0, 1]`.
    pub proportion: f64,
    /// Whether the request itself runs origin to terminus.
    pub full_span: bool,
}

/// How capacity, conflicts and the direct-allocation proportion turn into a
/// remaining-seat count.
///
/// The exact production blend is an operator-tuned business rule, so it sits
/// behind this trait rather than being hard-coded; [`SegmentEstimate`] is the
/// conservative baseline and [`DirectProportionBlend`] the default.
pub trait AvailabilityPolicy: Send + Sync {
    fn remaining(&self, input: &BlendInput) -> u32;
}

/// Capacity minus conflicting tickets, ignoring the proportion entirely.
/// Counts every seat the interval could physically use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentEstimate;

impl AvailabilityPolicy for SegmentEstimate {
    fn remaining(&self, input: &BlendInput) -> u32 {
        input.capacity.saturating_sub(input.conflicting)
    }
}

/// Reserves `floor(capacity * proportion)` seats for full-span riders.
/// A full-span request draws on the whole capacity; a partial request only
/// on the unreserved remainder. Saturating arithmetic keeps the count at
/// zero when a pool is overdrawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectProportionBlend;

impl AvailabilityPolicy for DirectProportionBlend {
    fn remaining(&self, input: &BlendInput) -> u32 {
        let pool = if input.full_span {
            input.capacity
        } else {
            let reserved = (f64::from(input.capacity) * input.proportion).floor() as u32;
            input.capacity.saturating_sub(reserved)
        };
        pool.saturating_sub(input.conflicting)
    }
}

/// Estimates how many more tickets of one class can be sold on `interval`.
///
/// Never negative: a snapshot that already overdraws the pool simply reads
/// as zero.
pub fn remaining_seats(
    capacity: u32,
    route: &Route,
    interval: &Interval,
    sold: &[SoldTicket],
    proportion: f64,
    policy: &dyn AvailabilityPolicy,
) -> u32 {
    let conflicting = sold
        .iter()
        .filter(|ticket| !is_released(route, ticket, interval))
        .count() as u32;
    let input = BlendInput {
        capacity,
        conflicting,
        proportion,
        full_span: route.is_full_span(interval),
    };
    let remaining = policy.remaining(&input);
    debug!(
        capacity,
        conflicting, remaining, "Computed remaining seats for interval"
    );
    remaining
}
