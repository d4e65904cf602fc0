// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::constants::IPGEOLOCATION_API_BASE;
use crate::providers::functions::{base_estimate, fetch_json, require_coordinates};
use crate::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};

pub mod models;

use models::IpGeolocationResponse;

const KIND: ProviderKind = ProviderKind::IpGeolocation;

/// ipgeolocation.io, requires an API key.
#[derive(Debug, Clone)]
pub struct IpGeolocation {
    pub config: ProviderConfig,
    pub client: Client,
    pub base_url: String,
}

impl IpGeolocation {
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client,
            base_url: IPGEOLOCATION_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GeoProvider for IpGeolocation {
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
        let api_key = self.config.api_key().unwrap_or_default();
        let ip = ip.to_string();
        let request = self.client.get(format!("{}/ipgeo", self.base_url)).query(&[
            ("apiKey", api_key),
            ("ip", ip.as_str()),
            ("fields", "geo,time_zone,isp"),
        ]);

        let data: IpGeolocationResponse = fetch_json(KIND.name(), request).await?;

        if data.latitude.is_none() {
            if let Some(message) = data.message {
                return Err(ProviderError::Api {
                    provider: KIND.name().to_string(),
                    message,
                });
            }
        }

        let (lat, lon) = require_coordinates(KIND.name(), data.latitude, data.longitude)?;
        let operator = data
            .isp
            .as_deref()
            .filter(|isp| !isp.is_empty())
            .or(data.organization.as_deref())
            .unwrap_or_default();

        let mut estimate = base_estimate(KIND, lat, lon, operator);
        estimate.city = data.city.unwrap_or_default();
        estimate.state = data.state_prov.unwrap_or_default();
        estimate.district = data.district.unwrap_or_default();
        estimate.country = data.country_name.unwrap_or_default();
        estimate.country_code = data.country_code2.unwrap_or_default();
        estimate.postal_code = data.zipcode.unwrap_or_default();
        estimate.timezone = data
            .time_zone
            .and_then(|tz| tz.name)
            .unwrap_or_default();
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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer, key: Option<&str>) -> IpGeolocation {
        let mut config = ProviderConfig::for_kind(KIND);
        config.api_key = key.map(str::to_string);
        IpGeolocation::new(config, Client::new()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn disabled_without_key() {
        let server = MockServer::start().await;
        assert!(!provider(&server, None).is_enabled());
        assert!(provider(&server, Some("key")).is_enabled());
    }

    #[tokio::test]
    async fn parses_string_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ipgeo"))
            .and(query_param("apiKey", "key"))
            .and(query_param("ip", "8.8.8.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "8.8.8.8",
                "country_code2": "US",
                "country_name": "United States",
                "state_prov": "California",
                "city": "Mountain View",
                "zipcode": "94043-1351",
                "latitude": "37.42240",
                "longitude": "-122.08421",
                "isp": "Google LLC",
                "time_zone": { "name": "America/Los_Angeles", "offset": -8 }
            })))
            .mount(&server)
            .await;

        let estimate = provider(&server, Some("key"))
            .locate(&"8.8.8.8".parse().unwrap())
            .await
            .unwrap();

        assert_eq!(estimate.lat, 37.4224);
        assert_eq!(estimate.lon, -122.08421);
        assert_eq!(estimate.timezone, "America/Los_Angeles");
        assert_eq!(estimate.confidence, 0.75);
    }

    #[tokio::test]
    async fn error_message_without_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Provided API key is not valid."
            })))
            .mount(&server)
            .await;

        let err = provider(&server, Some("bad"))
            .locate(&"8.8.8.8".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Api { .. }));
    }
}
