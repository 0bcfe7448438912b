use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::chain::ChainId;

pub mod loader;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FeedConfig {
    pub poll_interval_secs: u64,
    pub price_poll_interval_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            poll_interval_secs: 10,
            price_poll_interval_secs: 10,
        }
    }
}

/// Endpoints for one chain; consumed by whatever RPC layer backs the
/// chain data source.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChainEndpointConfig {
    pub ws_url: String,
    pub http_url: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OracleConfig {
    /// AMM pool whose slot0 carries the ETH/USD price.
    pub pool_address: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            pool_address: "0x88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640".to_string(),
        }
    }
}

pub fn default_chain_endpoints() -> HashMap<ChainId, ChainEndpointConfig> {
    let mut endpoints = HashMap::new();
    endpoints.insert(
        ChainId::Ethereum,
        ChainEndpointConfig {
            ws_url: "wss://ethereum-rpc.publicnode.com".to_string(),
            http_url: "https://ethereum-rpc.publicnode.com".to_string(),
        },
    );
    endpoints.insert(
        ChainId::Polygon,
        ChainEndpointConfig {
            ws_url: "wss://polygon-bor-rpc.publicnode.com".to_string(),
            http_url: "https://polygon-bor-rpc.publicnode.com".to_string(),
        },
    );
    endpoints.insert(
        ChainId::Arbitrum,
        ChainEndpointConfig {
            ws_url: "wss://arbitrum-one-rpc.publicnode.com".to_string(),
            http_url: "https://arbitrum-one-rpc.publicnode.com".to_string(),
        },
    );
    endpoints
}
