// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::constants::IPSTACK_API_BASE;
use crate::providers::functions::{base_estimate, fetch_json, require_coordinates};
use crate::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};

pub mod models;

use models::IpStackResponse;

const KIND: ProviderKind = ProviderKind::IpStack;

/// ipstack.com, requires an access key.
#[derive(Debug, Clone)]
pub struct IpStack {
    pub config: ProviderConfig,
    pub client: Client,
    pub base_url: String,
}

impl IpStack {
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client,
            base_url: IPSTACK_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GeoProvider for IpStack {
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
        let url = format!("{}/{}", self.base_url, ip);
        let request = self.client.get(&url).query(&[
            ("access_key", self.config.api_key().unwrap_or_default()),
            ("fields", "main,location,connection"),
        ]);
        let data: IpStackResponse = fetch_json(KIND.name(), request).await?;

        if let Some(error) = data.error {
            return Err(ProviderError::Api {
                provider: KIND.name().to_string(),
                message: error.describe(),
            });
        }

        let (lat, lon) = require_coordinates(KIND.name(), data.latitude, data.longitude)?;
        let operator = data
            .connection
            .as_ref()
            .and_then(|connection| connection.isp.as_deref())
            .unwrap_or_default();

        let mut estimate = base_estimate(KIND, lat, lon, operator);
        estimate.city = data.city.unwrap_or_default();
        estimate.state = data.region_name.unwrap_or_default();
        estimate.country = data.country_name.unwrap_or_default();
        estimate.country_code = data.country_code.unwrap_or_default();
        estimate.postal_code = data.zip.unwrap_or_default();
        Ok(estimate)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.api_key().is_some()
    }

    fn get_name(&self) -> &str {
        KIND.name()
    }
}
