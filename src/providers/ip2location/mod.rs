// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::constants::IP2LOCATION_API_BASE;
use crate::providers::functions::{base_estimate, fetch_json, require_coordinates};
use crate::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};

pub mod models;

use models::Ip2LocationResponse;

const KIND: ProviderKind = ProviderKind::Ip2Location;

/// ip2location.io, requires an API key.
#[derive(Debug, Clone)]
pub struct Ip2Location {
    pub config: ProviderConfig,
    pub client: Client,
    pub base_url: String,
}

impl Ip2Location {
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client,
            base_url: IP2LOCATION_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GeoProvider for Ip2Location {
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
        let ip = ip.to_string();
        let request = self.client.get(format!("{}/", self.base_url)).query(&[
            ("key", self.config.api_key().unwrap_or_default()),
            ("ip", ip.as_str()),
            ("format", "json"),
        ]);
        let data: Ip2LocationResponse = fetch_json(KIND.name(), request).await?;

        if let Some(error) = data.error {
            let message = error
                .error_message
                .unwrap_or_else(|| format!("error code {}", error.error_code.unwrap_or_default()));
            return Err(ProviderError::Api {
                provider: KIND.name().to_string(),
                message,
            });
        }

        let (lat, lon) = require_coordinates(KIND.name(), data.latitude, data.longitude)?;
        let operator = data.autonomous_system.as_deref().unwrap_or_default();

        let mut estimate = base_estimate(KIND, lat, lon, operator);
        estimate.city = data.city_name.unwrap_or_default();
        estimate.state = data.region_name.unwrap_or_default();
        estimate.country = data.country_name.unwrap_or_default();
        estimate.country_code = data.country_code.unwrap_or_default();
        estimate.postal_code = data.zip_code.unwrap_or_default();
        estimate.timezone = data.time_zone.unwrap_or_default();
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

    fn provider(server: &MockServer) -> Ip2Location {
        let mut config = ProviderConfig::for_kind(KIND);
        config.api_key = Some("i2l-key".to_string());
        Ip2Location::new(config, Client::new()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn maps_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("key", "i2l-key"))
            .and(query_param("ip", "8.8.8.8"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "8.8.8.8",
                "country_code": "US",
                "country_name": "United States of America",
                "region_name": "California",
                "city_name": "Mountain View",
                "latitude": 37.38605,
                "longitude": -122.08385,
                "zip_code": "94035",
                "time_zone": "-07:00",
                "asn": "15169",
                "as": "Google LLC",
                "is_proxy": false
            })))
            .mount(&server)
            .await;

        let estimate = provider(&server)
            .locate(&"8.8.8.8".parse().unwrap())
            .await
            .unwrap();

        assert_eq!(estimate.city, "Mountain View");
        assert_eq!(estimate.country, "United States of America");
        assert_eq!(estimate.postal_code, "94035");
        assert_eq!(estimate.confidence, 0.60);
    }

    #[tokio::test]
    async fn garbled_latitude_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": "12.5abc",
                "longitude": "-122.08385",
                "city_name": "Mountain View"
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .locate(&"8.8.8.8".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn error_object_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": { "error_code": 10000, "error_message": "Invalid API key or insufficient credit." }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .locate(&"8.8.8.8".parse().unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid API key"));
    }
}
