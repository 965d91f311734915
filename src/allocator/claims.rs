use chrono::NaiveDate;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::inventory::SeatClass;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClaimKey {
    train_number: Arc<str>,
    travel_date: NaiveDate,
    class: SeatClass,
}

/// One async mutex per (train, date, class) triple.
///
/// Seat assignment reads a snapshot and picks a number with nothing pinning
/// the snapshot in place; two concurrent requests over the same inventory
/// would otherwise both be granted the same seat. Holding the triple's lock
/// across fetch-and-compute closes that race inside this process. Across
/// processes the order store's claim write is still the only arbiter.
#[derive(Debug, Default)]
pub struct SeatClaims {
    locks: Mutex<HashMap<ClaimKey, Arc<AsyncMutex<()>>>>,
}

impl SeatClaims {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn lock(
        &self,
        train_number: &str,
        travel_date: NaiveDate,
        class: SeatClass,
    ) -> OwnedMutexGuard<()> {
        let key = ClaimKey {
            train_number: train_number.into(),
            travel_date,
            class,
        };
        let lock = {
            // The registry lock only guards the map itself and is never held
            // across an await.
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Travel dates advance forever, so keys that nobody holds or
            // waits on must not pile up. A strong count of one means only
            // the map still points at the mutex; guards and waiters each
            // hold a clone.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of claim keys currently tracked. Bounded by the number of
    /// in-flight assignments plus the key acquired last.
    pub fn active(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
