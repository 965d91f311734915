use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Station {0} is not part of the route")]
    StationNotFound(String),
    #[error("Station {0} appears more than once in the route")]
    DuplicateStation(String),
    #[error("Boarding station must come strictly before the alighting station")]
    InvalidInterval,
}

/// Travel interval along a route, as station indices.
/// Covers `[start, end)`: the passenger occupies a seat from boarding at
/// `start` until alighting at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Result<Self, self::Error> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(self::Error::InvalidInterval)
        }
    }
}

/// Ordered station sequence of a scheduled train run.
/// Indices increase toward the terminus and define the total order every
/// interval comparison relies on.
#[derive(Debug, Clone, Default)]
pub struct Route {
    pub train_number: Arc<str>,
    stations: Box<[Arc<str>]>,
    lookup: HashMap<Arc<str>, usize>,
}

impl Route {
    pub fn new<S: Into<Arc<str>>>(
        train_number: impl Into<Arc<str>>,
        stations: impl IntoIterator<Item = S>,
    ) -> Result<Self, self::Error> {
        let stations: Box<[Arc<str>]> = stations.into_iter().map(Into::into).collect();
        let mut lookup: HashMap<Arc<str>, usize> = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if lookup.insert(station.clone(), i).is_some() {
                return Err(self::Error::DuplicateStation(station.to_string()));
            }
        }
        Ok(Self {
            train_number: train_number.into(),
            stations,
            lookup,
        })
    }

    /// Zero-based position of a station along the route.
    pub fn index_of(&self, station: &str) -> Result<usize, self::Error> {
        self.lookup
            .get(station)
            .copied()
            .ok_or_else(|| self::Error::StationNotFound(station.to_string()))
    }

    /// Resolves a boarding/alighting pair into an interval.
    /// Both stations must be on the route and the boarding station must come
    /// strictly before the alighting one.
    pub fn interval(&self, from: &str, to: &str) -> Result<Interval, self::Error> {
        let start = self.index_of(from)?;
        let end = self.index_of(to)?;
        Interval::new(start, end)
    }

    /// True when the interval runs from the origin to the terminus.
    pub fn is_full_span(&self, interval: &Interval) -> bool {
        interval.start == 0 && interval.end + 1 == self.stations.len()
    }

    pub fn stations(&self) -> &[Arc<str>] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
