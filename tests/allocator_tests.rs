use chrono::NaiveDate;
use railseat::{
    allocator::{Allocator, BookingRequest, Error, SeatClaims},
    inventory::{Capacity, SeatClass, SoldTicket},
    provider::{
        self, CapacityProvider, ProportionProvider, ProviderFuture, RouteProvider, TicketProvider,
    },
    route::{self, Route},
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

struct FixedRoutes {
    stations: Vec<&'static str>,
}

impl RouteProvider for FixedRoutes {
    fn route<'a>(&'a self, train_number: &'a str) -> ProviderFuture<'a, Route> {
        Box::pin(async move {
            Route::new(train_number, self.stations.clone())
                .map_err(|e| provider::Error::Unavailable(e.to_string()))
        })
    }
}

/// Counts fetches so tests can prove validation short-circuits before any
/// snapshot call.
#[derive(Default)]
struct FixedTickets {
    sold: Vec<SoldTicket>,
    calls: AtomicUsize,
}

impl TicketProvider for FixedTickets {
    fn sold_tickets<'a>(
        &'a self,
        _train_number: &'a str,
        _travel_date: NaiveDate,
    ) -> ProviderFuture<'a, Vec<SoldTicket>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(self.sold.clone()) })
    }
}

#[derive(Default)]
struct FixedCapacity {
    capacity: Capacity,
    calls: AtomicUsize,
}

impl CapacityProvider for FixedCapacity {
    fn capacity<'a>(&'a self, _train_number: &'a str) -> ProviderFuture<'a, Capacity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(self.capacity) })
    }
}

struct FixedProportion(f64);

impl ProportionProvider for FixedProportion {
    fn proportion(&self) -> ProviderFuture<'_, f64> {
        Box::pin(async move { Ok(self.0) })
    }
}

struct FailingCapacity;

impl CapacityProvider for FailingCapacity {
    fn capacity<'a>(&'a self, _train_number: &'a str) -> ProviderFuture<'a, Capacity> {
        Box::pin(async move {
            Err(provider::Error::Unavailable(
                "train-service timed out".to_string(),
            ))
        })
    }
}

fn request(from: &str, to: &str) -> BookingRequest {
    BookingRequest {
        train_number: "G1234".into(),
        travel_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        from: from.into(),
        to: to.into(),
        class: SeatClass::Economy,
    }
}

fn allocator(
    sold: Vec<SoldTicket>,
    capacity: Capacity,
    proportion: f64,
) -> (Allocator, Arc<FixedTickets>, Arc<FixedCapacity>) {
    let tickets = Arc::new(FixedTickets {
        sold,
        calls: AtomicUsize::new(0),
    });
    let capacities = Arc::new(FixedCapacity {
        capacity,
        calls: AtomicUsize::new(0),
    });
    let allocator = Allocator::new(
        Arc::new(FixedRoutes {
            stations: vec!["shanghai", "nanjing", "jinan", "taian", "beijing"],
        }),
        tickets.clone(),
        capacities.clone(),
        Arc::new(FixedProportion(proportion)),
    );
    (allocator, tickets, capacities)
}

#[tokio::test]
async fn assignment_runs_end_to_end() {
    let capacity = Capacity {
        comfort: 2,
        economy: 5,
    };
    let (allocator, _, _) = allocator(vec![], capacity, 0.5);
    let assignment = allocator.assign(&request("shanghai", "taian")).await.unwrap();
    assert!((1..=5).contains(&assignment.seat));
    assert!(!assignment.reused);
}

#[tokio::test]
async fn other_classes_do_not_block_a_seat() {
    let capacity = Capacity {
        comfort: 1,
        economy: 1,
    };
    // The only economy seat is taken by a comfort-class snapshot entry,
    // which must be filtered out before assignment.
    let sold = vec![SoldTicket::new("beijing", 1, SeatClass::Comfort)];
    let (allocator, _, _) = allocator(sold, capacity, 0.5);
    let assignment = allocator.assign(&request("nanjing", "taian")).await.unwrap();
    assert_eq!(assignment.seat, 1);
}

#[tokio::test]
async fn unknown_station_rejects_before_any_fetch() {
    let capacity = Capacity {
        comfort: 2,
        economy: 5,
    };
    let (allocator, tickets, capacities) = allocator(vec![], capacity, 0.5);
    let result = allocator.assign(&request("shanghai", "wuxi")).await;
    assert!(matches!(
        result,
        Err(Error::Route(route::Error::StationNotFound(_)))
    ));
    assert_eq!(tickets.calls.load(Ordering::SeqCst), 0);
    assert_eq!(capacities.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn backward_interval_rejects_before_any_fetch() {
    let capacity = Capacity {
        comfort: 2,
        economy: 5,
    };
    let (allocator, tickets, _) = allocator(vec![], capacity, 0.5);
    let result = allocator.availability(&request("taian", "nanjing")).await;
    assert!(matches!(
        result,
        Err(Error::Route(route::Error::InvalidInterval))
    ));
    assert_eq!(tickets.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sold_out_is_a_business_outcome() {
    let capacity = Capacity {
        comfort: 0,
        economy: 0,
    };
    let (allocator, _, _) = allocator(vec![], capacity, 0.5);
    let result = allocator.assign(&request("shanghai", "beijing")).await;
    assert!(matches!(
        result,
        Err(Error::Seat(railseat::inventory::Error::NoSeatAvailable))
    ));
}

#[tokio::test]
async fn upstream_failure_is_distinguishable() {
    let tickets = Arc::new(FixedTickets::default());
    let allocator = Allocator::new(
        Arc::new(FixedRoutes {
            stations: vec!["shanghai", "nanjing", "beijing"],
        }),
        tickets,
        Arc::new(FailingCapacity),
        Arc::new(FixedProportion(0.5)),
    );
    let result = allocator.assign(&request("shanghai", "beijing")).await;
    assert!(matches!(result, Err(Error::Upstream(_))));
}

/// Stretches the fetch window so overlapping critical sections would be
/// caught in the act.
#[derive(Default)]
struct SlowTickets {
    in_flight: AtomicUsize,
    overlapped: AtomicBool,
}

impl TicketProvider for SlowTickets {
    fn sold_tickets<'a>(
        &'a self,
        _train_number: &'a str,
        _travel_date: NaiveDate,
    ) -> ProviderFuture<'a, Vec<SoldTicket>> {
        Box::pin(async move {
            if self.in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
                self.overlapped.store(true, Ordering::SeqCst);
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(vec![])
        })
    }
}

#[tokio::test]
async fn concurrent_assigns_on_one_trip_are_serialized() {
    let tickets = Arc::new(SlowTickets::default());
    let allocator = Arc::new(Allocator::new(
        Arc::new(FixedRoutes {
            stations: vec!["shanghai", "nanjing", "beijing"],
        }),
        tickets.clone(),
        Arc::new(FixedCapacity {
            capacity: Capacity {
                comfort: 2,
                economy: 5,
            },
            calls: AtomicUsize::new(0),
        }),
        Arc::new(FixedProportion(0.5)),
    ));

    let first = tokio::spawn({
        let allocator = allocator.clone();
        async move { allocator.assign(&request("shanghai", "beijing")).await }
    });
    let second = tokio::spawn({
        let allocator = allocator.clone();
        async move { allocator.assign(&request("shanghai", "beijing")).await }
    });
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    // Same train, date and class: the second request must only enter its
    // fetch-and-compute window once the first one is done with it.
    assert!(!tickets.overlapped.load(Ordering::SeqCst));
}

#[tokio::test]
async fn released_claim_keys_are_pruned() {
    let claims = SeatClaims::new();
    let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    let guard = claims.lock("G1", date, SeatClass::Economy).await;
    drop(guard);
    let _held = claims.lock("D5", date, SeatClass::Economy).await;

    // The released G1 entry is gone; only the held key remains tracked.
    assert_eq!(claims.active(), 1);
}

#[tokio::test]
async fn held_claim_keys_survive_pruning() {
    let claims = SeatClaims::new();
    let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

    let _first = claims.lock("G1", date, SeatClass::Economy).await;
    let _second = claims.lock("D5", date, SeatClass::Comfort).await;

    assert_eq!(claims.active(), 2);
}

#[tokio::test]
async fn availability_flows_through_the_policy() {
    let capacity = Capacity {
        comfort: 2,
        economy: 10,
    };
    let sold = vec![
        SoldTicket::new("beijing", 1, SeatClass::Economy),
        SoldTicket::new("nanjing", 2, SeatClass::Economy),
    ];
    let (allocator, _, _) = allocator(sold, capacity, 0.0);
    // Boarding at jinan: the beijing rider conflicts, the nanjing rider has
    // already alighted.
    let left = allocator
        .availability(&request("jinan", "beijing"))
        .await
        .unwrap();
    assert_eq!(left, 9);
}
