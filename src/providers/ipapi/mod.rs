// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::constants::IPAPI_API_BASE;
use crate::providers::functions::{base_estimate, fetch_json, require_coordinates};
use crate::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};

pub mod models;

use models::IpApiResponse;

const KIND: ProviderKind = ProviderKind::IpApi;

/// ipapi.co, keyless.
#[derive(Debug, Clone)]
pub struct IpApi {
    pub config: ProviderConfig,
    pub client: Client,
    pub base_url: String,
}

impl IpApi {
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client,
            base_url: IPAPI_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GeoProvider for IpApi {
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
        let url = format!("{}/{}/json/", self.base_url, ip);
        let data: IpApiResponse = fetch_json(KIND.name(), self.client.get(&url)).await?;

        if data.error {
            return Err(ProviderError::Api {
                provider: KIND.name().to_string(),
                message: data.reason.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let (lat, lon) = require_coordinates(KIND.name(), data.latitude, data.longitude)?;
        let mut estimate = base_estimate(KIND, lat, lon, data.org.as_deref().unwrap_or_default());
        estimate.city = data.city.unwrap_or_default();
        estimate.state = data.region.unwrap_or_default();
        estimate.country = data.country_name.unwrap_or_default();
        estimate.country_code = data.country_code.unwrap_or_default();
        estimate.postal_code = data.postal.unwrap_or_default();
        estimate.timezone = data.timezone.unwrap_or_default();
        Ok(estimate)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn get_name(&self) -> &str {
        KIND.name()
    }
}
