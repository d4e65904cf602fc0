// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::constants::IPINFO_API_BASE;
use crate::providers::functions::{base_estimate, fetch_json, require_coordinates};
use crate::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};

pub mod models;

use models::IpInfoResponse;

const KIND: ProviderKind = ProviderKind::IpInfo;

/// ipinfo.io. Works without a token; a configured token raises the quota.
#[derive(Debug, Clone)]
pub struct IpInfo {
    pub config: ProviderConfig,
    pub client: Client,
    pub base_url: String,
}

impl IpInfo {
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client,
            base_url: IPINFO_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn into_estimate(data: IpInfoResponse) -> Result<LocationEstimate, ProviderError> {
        if data.bogon {
            return Err(ProviderError::Api {
                provider: KIND.name().to_string(),
                message: "address is not publicly routable".to_string(),
            });
        }

        let loc = data.loc.ok_or_else(|| ProviderError::MissingField {
            provider: KIND.name().to_string(),
            field: "loc",
        })?;
        let (lat, lon) = parse_loc(&loc)?;
        let (lat, lon) = require_coordinates(KIND.name(), lat, lon)?;

        let mut estimate = base_estimate(KIND, lat, lon, data.org.as_deref().unwrap_or_default());
        estimate.city = data.city.unwrap_or_default();
        estimate.state = data.region.unwrap_or_default();
        estimate.country_code = data.country.unwrap_or_default();
        estimate.postal_code = data.postal.unwrap_or_default();
        estimate.timezone = data.timezone.unwrap_or_default();
        Ok(estimate)
    }
}

fn parse_loc(loc: &str) -> Result<(Option<f64>, Option<f64>), ProviderError> {
    let (lat, lon) = loc.split_once(',').ok_or_else(|| ProviderError::Parse {
        provider: KIND.name().to_string(),
        message: format!("unexpected loc value '{}'", loc),
    })?;
    Ok((lat.trim().parse().ok(), lon.trim().parse().ok()))
}

#[async_trait]
impl GeoProvider for IpInfo {
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
        let url = format!("{}/{}/json", self.base_url, ip);
        let mut request = self.client.get(&url);
        if let Some(token) = self.config.api_key() {
            request = request.query(&[("token", token)]);
        }

        let data: IpInfoResponse = fetch_json(KIND.name(), request).await?;
        Self::into_estimate(data)
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
