// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::constants::IP_API_COM_BASE;
use crate::providers::functions::{base_estimate, fetch_json, require_coordinates};
use crate::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};

pub mod models;

use models::{IpApiComResponse, IP_API_FIELDS};

const KIND: ProviderKind = ProviderKind::IpApiCom;

/// ip-api.com free endpoint (HTTP only, 45 requests per minute).
#[derive(Debug, Clone)]
pub struct IpApiCom {
    pub config: ProviderConfig,
    pub client: Client,
    pub base_url: String,
}

impl IpApiCom {
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client,
            base_url: IP_API_COM_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GeoProvider for IpApiCom {
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
        let url = format!("{}/json/{}", self.base_url, ip);
        let request = self.client.get(&url).query(&[("fields", IP_API_FIELDS)]);
        let data: IpApiComResponse = fetch_json(KIND.name(), request).await?;

        if data.status.as_deref() == Some("fail") {
            return Err(ProviderError::Api {
                provider: KIND.name().to_string(),
                message: data.message.unwrap_or_else(|| "lookup failed".to_string()),
            });
        }

        let (lat, lon) = require_coordinates(KIND.name(), data.lat, data.lon)?;
        let mut estimate = base_estimate(KIND, lat, lon, data.operator());
        estimate.city = data.city.unwrap_or_default();
        estimate.state = data.region_name.unwrap_or_default();
        estimate.country = data.country.unwrap_or_default();
        estimate.country_code = data.country_code.unwrap_or_default();
        estimate.postal_code = data.zip.unwrap_or_default();
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
