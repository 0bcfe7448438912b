use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::{ChainEndpointConfig, FeedConfig, OracleConfig, default_chain_endpoints};
use crate::error::{Error, Result};
use crate::types::chain::ChainId;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feeds: FeedConfig,
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default = "default_chain_endpoints")]
    pub chains: HashMap<ChainId, ChainEndpointConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            feeds: FeedConfig::default(),
            oracle: OracleConfig::default(),
            chains: default_chain_endpoints(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("GASWATCH"))
            .build()
            .map_err(|e| Error::ConfigError(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| Error::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_chain() {
        let config = AppConfig::default();
        assert_eq!(config.feeds.poll_interval_secs, 10);
        assert_eq!(config.chains.len(), ChainId::ALL.len());
        for chain in ChainId::ALL {
            let endpoints = config.chains.get(&chain).unwrap();
            assert!(endpoints.ws_url.starts_with("wss://"));
            assert!(endpoints.http_url.starts_with("https://"));
        }
    }
}
