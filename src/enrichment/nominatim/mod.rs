// Standard library
use std::time::Duration;

// 3rd party crates
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::info;

// Project imports
use crate::location::PlaceSuggestion;

// Current module imports
use super::constants::{
    DEFAULT_GEOCODER_TIMEOUT_SECS, DEFAULT_USER_AGENT, NOMINATIM_BASE, NOMINATIM_SOURCE,
};
use super::errors::GeocodeError;
use super::functions::fetch_json;
use super::traits::Geocoder;
use super::types::{Address, PlaceDetails, ReverseGeocode};

pub mod models;

use models::{
    first_non_empty, NominatimAddress, NominatimAddressPart, NominatimDetails, NominatimPlace,
    NominatimReverse,
};

/// OpenStreetMap Nominatim. No key, but the usage policy requires an
/// identifying User-Agent.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    pub client: Client,
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl NominatimGeocoder {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: NOMINATIM_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_GEOCODER_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub fn address_from_nominatim(address: &NominatimAddress, display_name: &str) -> Address {
    Address {
        house_number: address.house_number.clone(),
        road: address.road.clone(),
        neighborhood: first_non_empty(&[&address.neighbourhood, &address.residential]).to_string(),
        suburb: first_non_empty(&[&address.suburb, &address.city_district]).to_string(),
        city: address.settlement().to_string(),
        postal_town: String::new(),
        district: address.county.clone(),
        state: first_non_empty(&[&address.state, &address.region]).to_string(),
        country: address.country.clone(),
        country_code: address.country_code.to_uppercase(),
        postal_code: address.postcode.clone(),
        formatted_address: display_name.to_string(),
    }
}

/// Fills address fields from `/details` parts by Nominatim address rank;
/// the most specific part of each rank band wins.
pub fn address_from_details(details: &NominatimDetails) -> Address {
    let mut address = Address {
        country_code: details.country_code.to_uppercase(),
        postal_code: details.calculated_postcode.clone(),
        ..Default::default()
    };

    for part in &details.address {
        if part.localname.is_empty() {
            continue;
        }
        match part.kind.as_str() {
            "country_code" => {
                if address.country_code.is_empty() {
                    address.country_code = part.localname.to_uppercase();
                }
                continue;
            }
            "postcode" => {
                if address.postal_code.is_empty() {
                    address.postal_code.clone_from(&part.localname);
                }
                continue;
            }
            _ => {}
        }
        if !part.isaddress {
            continue;
        }
        if let Some(field) = rank_field(&mut address, part) {
            if field.is_empty() {
                field.clone_from(&part.localname);
            }
        }
    }

    address.formatted_address = details
        .address
        .iter()
        .filter(|part| part.isaddress && !part.localname.is_empty())
        .map(|part| part.localname.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if address.formatted_address.is_empty() {
        address.formatted_address.clone_from(&details.localname);
    }
    address
}

fn rank_field<'a>(address: &'a mut Address, part: &NominatimAddressPart) -> Option<&'a mut String> {
    match part.rank_address {
        28..=30 => Some(&mut address.house_number),
        26..=27 => Some(&mut address.road),
        22..=25 => Some(&mut address.neighborhood),
        17..=21 => Some(&mut address.suburb),
        13..=16 => Some(&mut address.city),
        10..=12 => Some(&mut address.district),
        5..=9 => Some(&mut address.state),
        4 => Some(&mut address.country),
        _ => None,
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<ReverseGeocode, GeocodeError> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let request = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .header(USER_AGENT, self.user_agent.as_str())
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("format", "json"),
                ("addressdetails", "1"),
                ("zoom", "18"),
            ])
            .timeout(self.timeout);

        let data: NominatimReverse = fetch_json(NOMINATIM_SOURCE, request).await?;
        if let Some(error) = data.error {
            return Err(GeocodeError::Status {
                geocoder: NOMINATIM_SOURCE,
                status: error,
            });
        }

        let address = address_from_nominatim(&data.address, &data.display_name);
        info!(city = %address.city, state = %address.state, country = %address.country, "Nominatim reverse geocode succeeded");
        Ok(ReverseGeocode {
            address,
            precision: None,
        })
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
        let limit_param = limit.to_string();
        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .header(USER_AGENT, self.user_agent.as_str())
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", limit_param.as_str()),
                ("accept-language", "en"),
            ])
            .timeout(self.timeout);

        let places: Vec<NominatimPlace> = fetch_json(NOMINATIM_SOURCE, request).await?;
        let suggestions: Vec<_> = places
            .into_iter()
            .filter_map(|place| {
                let (lat, lon) = (place.lat?, place.lon?);
                let name = if place.name.is_empty() {
                    place.address.settlement().to_string()
                } else {
                    place.name.clone()
                };
                Some(PlaceSuggestion {
                    name,
                    place_id: place.place_id(),
                    display_name: place.display_name,
                    lat,
                    lon,
                    source: NOMINATIM_SOURCE.to_string(),
                })
            })
            .take(limit)
            .collect();

        if suggestions.is_empty() {
            return Err(GeocodeError::NoResults(NOMINATIM_SOURCE));
        }
        Ok(suggestions)
    }

    async fn lookup(&self, place_id: &str) -> Result<PlaceDetails, GeocodeError> {
        let request = self
            .client
            .get(format!("{}/details", self.base_url))
            .header(USER_AGENT, self.user_agent.as_str())
            .query(&[
                ("place_id", place_id),
                ("format", "json"),
                ("addressdetails", "1"),
            ])
            .timeout(self.timeout);

        let details: NominatimDetails = fetch_json(NOMINATIM_SOURCE, request).await?;
        let Some((lat, lon)) = details.centroid.as_ref().and_then(|point| point.lat_lon()) else {
            return Err(GeocodeError::Parse {
                geocoder: NOMINATIM_SOURCE,
                message: "place has no centroid".to_string(),
            });
        };

        let address = address_from_details(&details);
        info!(place_id = %place_id, city = %address.city, country = %address.country, "Nominatim place lookup succeeded");
        Ok(PlaceDetails {
            lat,
            lon,
            geocode: ReverseGeocode {
                address,
                precision: None,
            },
        })
    }

    fn get_name(&self) -> &'static str {
        NOMINATIM_SOURCE
    }
}
