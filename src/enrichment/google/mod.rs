// Standard library
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

// Project imports
use crate::location::PlaceSuggestion;

// Current module imports
use super::constants::{DEFAULT_GEOCODER_TIMEOUT_SECS, GOOGLE_GEOCODE_BASE, GOOGLE_SOURCE};
use super::errors::GeocodeError;
use super::functions::fetch_json;
use super::traits::Geocoder;
use super::types::{Address, PlaceDetails, ReverseGeocode};

pub mod models;

use models::{GoogleComponent, GoogleGeocodeResponse, GoogleResult};

/// Google Geocoding API; requires a key.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    pub api_key: String,
    pub client: Client,
    pub base_url: String,
    pub timeout: Duration,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            client,
            base_url: GOOGLE_GEOCODE_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_GEOCODER_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn geocode(&self, params: &[(&str, &str)]) -> Result<Vec<GoogleResult>, GeocodeError> {
        let request = self
            .client
            .get(format!("{}/json", self.base_url))
            .query(params)
            .query(&[("key", self.api_key.as_str()), ("language", "en")])
            .timeout(self.timeout);

        let data: GoogleGeocodeResponse = fetch_json(GOOGLE_SOURCE, request).await?;
        match data.status.as_str() {
            "OK" if !data.results.is_empty() => Ok(data.results),
            "OK" | "ZERO_RESULTS" => Err(GeocodeError::NoResults(GOOGLE_SOURCE)),
            _ => Err(GeocodeError::Status {
                geocoder: GOOGLE_SOURCE,
                status: match data.error_message {
                    Some(message) => format!("{} ({})", data.status, message),
                    None => data.status,
                },
            }),
        }
    }
}

/// Maps address components; for each component the first matching type
/// in precedence order decides which field it fills.
pub fn address_from_components(components: &[GoogleComponent]) -> Address {
    let mut address = Address::default();
    for component in components {
        let name = component.long_name.clone();
        if component.has_type("street_number") {
            address.house_number = name;
        } else if component.has_type("route") {
            address.road = name;
        } else if component.has_type("neighborhood") {
            address.neighborhood = name;
        } else if component.has_type("sublocality_level_1") || component.has_type("sublocality") {
            address.suburb = name;
        } else if component.has_type("locality") {
            address.city = name;
        } else if component.has_type("postal_town") {
            address.postal_town = name;
        } else if component.has_type("administrative_area_level_2") {
            address.district = name;
        } else if component.has_type("administrative_area_level_1") {
            address.state = name;
        } else if component.has_type("country") {
            address.country = name;
            address.country_code = component.short_name.clone();
        } else if component.has_type("postal_code") {
            address.postal_code = name;
        }
    }

    if address.city.is_empty() {
        address.city = [&address.postal_town, &address.district, &address.suburb]
            .into_iter()
            .find(|value| !value.is_empty())
            .cloned()
            .unwrap_or_default();
    }
    address
}

pub fn precision_for(location_type: Option<&str>) -> Option<f64> {
    match location_type? {
        "ROOFTOP" => Some(0.99),
        "RANGE_INTERPOLATED" => Some(0.95),
        "GEOMETRIC_CENTER" => Some(0.90),
        "APPROXIMATE" => Some(0.85),
        _ => None,
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<ReverseGeocode, GeocodeError> {
        let latlng = format!("{},{}", lat, lon);
        let results = self.geocode(&[("latlng", latlng.as_str())]).await?;
        let Some(best) = results.into_iter().next() else {
            return Err(GeocodeError::NoResults(GOOGLE_SOURCE));
        };

        let mut address = address_from_components(&best.address_components);
        address.formatted_address = best.formatted_address;
        let precision = precision_for(
            best.geometry
                .as_ref()
                .and_then(|geometry| geometry.location_type.as_deref()),
        );

        info!(city = %address.city, state = %address.state, country = %address.country, "Google reverse geocode succeeded");
        Ok(ReverseGeocode { address, precision })
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
        let results = self.geocode(&[("address", query)]).await?;
        let suggestions: Vec<_> = results
            .into_iter()
            .filter_map(|result| {
                let location = result.geometry.as_ref()?.location.as_ref()?;
                let (lat, lon) = (location.lat, location.lng);
                let address = address_from_components(&result.address_components);
                let name = if address.city.is_empty() {
                    result
                        .formatted_address
                        .split(',')
                        .next()
                        .unwrap_or_default()
                        .trim()
                        .to_string()
                } else {
                    address.city
                };
                Some(PlaceSuggestion {
                    name,
                    display_name: result.formatted_address,
                    lat,
                    lon,
                    place_id: result.place_id,
                    source: GOOGLE_SOURCE.to_string(),
                })
            })
            .take(limit)
            .collect();

        if suggestions.is_empty() {
            return Err(GeocodeError::NoResults(GOOGLE_SOURCE));
        }
        Ok(suggestions)
    }

    async fn lookup(&self, place_id: &str) -> Result<PlaceDetails, GeocodeError> {
        let results = self.geocode(&[("place_id", place_id)]).await?;
        let Some(best) = results.into_iter().next() else {
            return Err(GeocodeError::NoResults(GOOGLE_SOURCE));
        };
        let Some(geometry) = best.geometry else {
            return Err(GeocodeError::Parse {
                geocoder: GOOGLE_SOURCE,
                message: "place has no geometry".to_string(),
            });
        };
        let Some(location) = geometry.location else {
            return Err(GeocodeError::Parse {
                geocoder: GOOGLE_SOURCE,
                message: "place has no location".to_string(),
            });
        };

        let mut address = address_from_components(&best.address_components);
        address.formatted_address = best.formatted_address;
        Ok(PlaceDetails {
            lat: location.lat,
            lon: location.lng,
            geocode: ReverseGeocode {
                address,
                precision: precision_for(geometry.location_type.as_deref()),
            },
        })
    }

    fn get_name(&self) -> &'static str {
        GOOGLE_SOURCE
    }
}
