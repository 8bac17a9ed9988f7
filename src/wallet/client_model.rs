use crate::config::{Config, Network};

/// Node side context the send and add-token pages read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientModel {
    network: Network,
    default_gas_limit: u64,
    default_gas_price: String,
}

impl ClientModel {
    pub fn new(network: Network, default_gas_limit: u64, default_gas_price: impl Into<String>) -> Self {
        Self {
            network,
            default_gas_limit,
            default_gas_price: default_gas_price.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.network, config.gas_limit, config.gas_price.clone())
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn default_gas_limit(&self) -> u64 {
        self.default_gas_limit
    }

    pub fn default_gas_price(&self) -> &str {
        &self.default_gas_price
    }
}
