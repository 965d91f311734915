//! Reqwest-backed implementations of the core's provider seams.
//!
//! Every upstream speaks the platform envelope; a transport failure, a
//! non-2xx reply or a `status: 0` envelope all surface as
//! `provider::Error::Unavailable` so the booking workflow can decide
//! whether to retry or compensate. No retries happen here.

use chrono::NaiveDate;
use railseat::{
    inventory::{Capacity, SeatClass, SoldTicket},
    provider::{
        CapacityProvider, Error, ProportionProvider, ProviderFuture, RouteProvider,
        TicketProvider, TrainKind,
    },
    route::Route,
};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::warn;

use crate::dto::Envelope;

const PROPORTION_KEY: &str = "DirectTicketAllocationProportion";
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Base URLs of the services this core reads from.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub route_url: String,
    pub train_url: String,
    pub order_url: String,
    pub order_other_url: String,
    pub config_url: String,
}

impl UpstreamConfig {
    /// Reads every base URL from the environment, falling back to the
    /// docker-compose service names.
    pub fn from_env() -> Self {
        let var = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.into());
        Self {
            route_url: var("ROUTE_SERVICE_URL", "http://route-service:3001"),
            train_url: var("TRAIN_SERVICE_URL", "http://train-service:3002"),
            order_url: var("ORDER_SERVICE_URL", "http://order-service:3003"),
            order_other_url: var("ORDER_OTHER_SERVICE_URL", "http://order-other-service:3004"),
            config_url: var("CONFIG_SERVICE_URL", "http://config-service:3005"),
        }
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// One envelope-unwrapping GET against an upstream.
async fn fetch<T: DeserializeOwned>(client: &reqwest::Client, url: String) -> Result<T, Error> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Unavailable(format!("{url}: {e}")))?;
    if !response.status().is_success() {
        return Err(Error::Unavailable(format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }
    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| Error::Unavailable(format!("{url}: {e}")))?;
    match envelope.data {
        Some(data) if envelope.status == 1 => Ok(data),
        _ => {
            warn!(url = %url, msg = %envelope.msg, "Upstream rejected the request");
            Err(Error::Unavailable(format!("{url}: {}", envelope.msg)))
        }
    }
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    stations: Vec<String>,
}

pub struct HttpRouteProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRouteProvider {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

impl RouteProvider for HttpRouteProvider {
    fn route<'a>(&'a self, train_number: &'a str) -> ProviderFuture<'a, Route> {
        Box::pin(async move {
            let url = format!("{}/api/v1/routes/{}", self.base_url, train_number);
            let dto: RouteDto = fetch(&self.client, url).await?;
            Route::new(train_number, dto.stations)
                .map_err(|e| Error::Unavailable(format!("Bad route payload: {e}")))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SoldTicketDto {
    dest_station: String,
    seat_number: u32,
    seat_class: u32,
}

/// Sold tickets live in twin order stores, one per fleet; the train number's
/// leading character picks the store.
pub struct HttpTicketProvider {
    client: reqwest::Client,
    order_url: String,
    order_other_url: String,
}

impl HttpTicketProvider {
    pub fn new(client: reqwest::Client, order_url: String, order_other_url: String) -> Self {
        Self {
            client,
            order_url,
            order_other_url,
        }
    }

    fn base_url(&self, train_number: &str) -> &str {
        match TrainKind::of(train_number) {
            TrainKind::HighSpeed => &self.order_url,
            TrainKind::Regular => &self.order_other_url,
        }
    }
}

impl TicketProvider for HttpTicketProvider {
    fn sold_tickets<'a>(
        &'a self,
        train_number: &'a str,
        travel_date: NaiveDate,
    ) -> ProviderFuture<'a, Vec<SoldTicket>> {
        Box::pin(async move {
            let url = format!(
                "{}/api/v1/orders/tickets/{}/{}",
                self.base_url(train_number),
                train_number,
                travel_date
            );
            let dtos: Vec<SoldTicketDto> = fetch(&self.client, url).await?;
            Ok(dtos
                .into_iter()
                .map(|dto| {
                    SoldTicket::new(
                        dto.dest_station,
                        dto.seat_number,
                        SeatClass::from_type_code(dto.seat_class),
                    )
                })
                .collect())
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrainTypeDto {
    comfort_class: u32,
    economy_class: u32,
}

pub struct HttpCapacityProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCapacityProvider {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

impl CapacityProvider for HttpCapacityProvider {
    fn capacity<'a>(&'a self, train_number: &'a str) -> ProviderFuture<'a, Capacity> {
        Box::pin(async move {
            let url = format!("{}/api/v1/trains/{}", self.base_url, train_number);
            let dto: TrainTypeDto = fetch(&self.client, url).await?;
            Ok(Capacity {
                comfort: dto.comfort_class,
                economy: dto.economy_class,
            })
        })
    }
}

#[derive(Debug, Deserialize)]
struct ConfigDto {
    value: String,
}

pub struct HttpProportionProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProportionProvider {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

impl ProportionProvider for HttpProportionProvider {
    fn proportion(&self) -> ProviderFuture<'_, f64> {
        Box::pin(async move {
            let url = format!("{}/api/v1/configs/{}", self.base_url, PROPORTION_KEY);
            let dto: ConfigDto = fetch(&self.client, url).await?;
            dto.value
                .trim()
                .parse()
                .map_err(|e| Error::Unavailable(format!("Bad proportion value: {e}")))
        })
    }
}
