use railseat::allocator::Allocator;
use std::sync::Arc;

use crate::upstream::{
    HttpCapacityProvider, HttpProportionProvider, HttpRouteProvider, HttpTicketProvider,
    UpstreamConfig, client,
};

pub struct AppState {
    pub allocator: Allocator,
}

impl AppState {
    pub fn new(config: UpstreamConfig) -> Self {
        let client = client();
        let allocator = Allocator::new(
            Arc::new(HttpRouteProvider::new(client.clone(), config.route_url)),
            Arc::new(HttpTicketProvider::new(
                client.clone(),
                config.order_url,
                config.order_other_url,
            )),
            Arc::new(HttpCapacityProvider::new(client.clone(), config.train_url)),
            Arc::new(HttpProportionProvider::new(client, config.config_url)),
        );
        Self { allocator }
    }
}
