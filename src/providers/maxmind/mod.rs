// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;

// Project imports
use crate::location::LocationEstimate;
use crate::providers::constants::{MAXMIND_API_BASE, MAX_PROVIDER_ACCURACY, MIN_PROVIDER_ACCURACY};
use crate::providers::functions::{base_estimate, fetch_json, require_coordinates};
use crate::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};

pub mod models;

use models::MaxMindCityResponse;

const KIND: ProviderKind = ProviderKind::MaxMind;

/// Ceiling for the accuracy derived from the reported radius.
const MAX_RADIUS_ACCURACY: f64 = 0.75;

/// MaxMind GeoIP2 City web service; basic auth with account id and licence key.
#[derive(Debug, Clone)]
pub struct MaxMind {
    pub config: ProviderConfig,
    pub client: Client,
    pub base_url: String,
}

impl MaxMind {
    pub fn new(config: ProviderConfig, client: Client) -> Self {
        Self {
            config,
            client,
            base_url: MAXMIND_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Blends the operator heuristic with the radius MaxMind reports.
fn refine_accuracy(heuristic: f64, radius_km: Option<f64>) -> f64 {
    match radius_km {
        Some(radius) if radius > 0.0 => {
            let from_radius = (1.0 - radius / 200.0).min(MAX_RADIUS_ACCURACY);
            ((heuristic + from_radius) / 2.0).clamp(MIN_PROVIDER_ACCURACY, MAX_PROVIDER_ACCURACY)
        }
        _ => heuristic,
    }
}

#[async_trait]
impl GeoProvider for MaxMind {
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
        let url = format!("{}/geoip/v2.1/city/{}", self.base_url, ip);
        let request = self.client.get(&url).basic_auth(
            self.config.account_id().unwrap_or_default(),
            self.config.api_key(),
        );
        let data: MaxMindCityResponse = fetch_json(KIND.name(), request).await?;

        let location = data.location.ok_or_else(|| ProviderError::MissingField {
            provider: KIND.name().to_string(),
            field: "location",
        })?;
        let (lat, lon) = require_coordinates(KIND.name(), location.latitude, location.longitude)?;

        let operator = data
            .traits
            .as_ref()
            .map(|traits| traits.operator())
            .unwrap_or_default();
        let mut estimate = base_estimate(KIND, lat, lon, operator);
        estimate.accuracy = refine_accuracy(estimate.accuracy, location.accuracy_radius);
        if let Some(radius) = location.accuracy_radius.filter(|r| *r > 0.0) {
            estimate.accuracy_radius = radius * 1000.0;
        }

        estimate.city = data.city.map(|city| city.english()).unwrap_or_default();
        estimate.state = data
            .subdivisions
            .first()
            .map(|subdivision| subdivision.english())
            .unwrap_or_default();
        if let Some(country) = data.country {
            estimate.country = country.names.get("en").cloned().unwrap_or_default();
            estimate.country_code = country.iso_code.unwrap_or_default();
        }
        estimate.postal_code = data
            .postal
            .and_then(|postal| postal.code)
            .unwrap_or_default();
        estimate.timezone = location.time_zone.unwrap_or_default();
        Ok(estimate)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
            && self.config.api_key().is_some()
            && self.config.account_id().is_some()
    }

    fn get_name(&self) -> &str {
        KIND.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> MaxMind {
        let mut config = ProviderConfig::for_kind(KIND);
        config.api_key = Some("licence".to_string());
        config.account_id = Some("12345".to_string());
        MaxMind::new(config, Client::new()).with_base_url(server.uri())
    }

    #[test]
    fn needs_account_and_key() {
        let mut config = ProviderConfig::for_kind(KIND);
        config.api_key = Some("licence".to_string());
        assert!(!MaxMind::new(config.clone(), Client::new()).is_enabled());

        config.account_id = Some("12345".to_string());
        assert!(MaxMind::new(config, Client::new()).is_enabled());
    }

    #[test]
    fn smaller_radius_means_higher_accuracy() {
        let tight = refine_accuracy(0.6, Some(5.0));
        let loose = refine_accuracy(0.6, Some(100.0));
        assert!(tight > loose);
        assert_eq!(refine_accuracy(0.6, None), 0.6);
    }

    #[tokio::test]
    async fn maps_nested_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geoip/v2.1/city/2.125.160.216"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": { "names": { "en": "Boxford", "de": "Boxford" } },
                "country": { "iso_code": "GB", "names": { "en": "United Kingdom" } },
                "location": {
                    "accuracy_radius": 100,
                    "latitude": 51.75,
                    "longitude": -1.25,
                    "time_zone": "Europe/London"
                },
                "postal": { "code": "OX1" },
                "subdivisions": [ { "iso_code": "ENG", "names": { "en": "England" } } ],
                "traits": { "isp": "BT Broadband" }
            })))
            .mount(&server)
            .await;

        let estimate = provider(&server)
            .locate(&"2.125.160.216".parse().unwrap())
            .await
            .unwrap();

        assert_eq!(estimate.city, "Boxford");
        assert_eq!(estimate.state, "England");
        assert_eq!(estimate.country, "United Kingdom");
        assert_eq!(estimate.country_code, "GB");
        assert_eq!(estimate.postal_code, "OX1");
        assert_eq!(estimate.accuracy_radius, 100_000.0);
        assert_eq!(estimate.confidence, 0.80);
    }

    #[tokio::test]
    async fn unauthorized_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": "AUTHORIZATION_INVALID",
                "error": "invalid licence key"
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .locate(&"2.125.160.216".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::HttpStatus { status: 401, .. }));
    }
}
