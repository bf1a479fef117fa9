use reqwest::Client;

use crate::config::RelayConfig;

#[derive(Clone)]
pub struct RelayState {
    pub config: RelayConfig,
    pub client: Client,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: RelayConfig, client: Client) -> Self {
        Self { config, client }
    }
}
