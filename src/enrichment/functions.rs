// 3rd party crates
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::trace;

// Project imports
use crate::location::constants::MAX_SCORE;
use crate::location::{LocationEstimate, SourceType};

// Current module imports
use super::constants::{
    DEFAULT_GOOGLE_PRECISION, FALLBACK_ACCURACY_BOOST, FALLBACK_ACCURACY_CAP, GOOGLE_SOURCE,
    GPS_FALLBACK_SCORE, GPS_PRIMARY_CONFIDENCE, NOMINATIM_SOURCE, PRIMARY_ACCURACY_BOOST,
    PRIMARY_CONFIDENCE_BOOST,
};
use super::errors::GeocodeError;
use super::types::{Address, ReverseGeocode, Tier};

/// Sends `request` and decodes a JSON body; any non-2xx status is an error.
pub async fn fetch_json<T: DeserializeOwned>(
    geocoder: &'static str,
    request: RequestBuilder,
) -> Result<T, GeocodeError> {
    let response = request
        .send()
        .await
        .map_err(|source| GeocodeError::Network { geocoder, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeocodeError::HttpStatus {
            geocoder,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| GeocodeError::Network { geocoder, source })?;
    trace!(geocoder = %geocoder, body = %body, "Received geocoder response");

    serde_json::from_str(&body).map_err(|e| GeocodeError::Parse {
        geocoder,
        message: e.to_string(),
    })
}

/// Geocoder name for a place source as found in search results. Older
/// clients send `google` or `google_places` for Google.
pub fn geocoder_for_source(source: &str) -> Option<&'static str> {
    match source.trim().to_ascii_lowercase().as_str() {
        "google" | "google_places" | "google_maps" => Some(GOOGLE_SOURCE),
        "nominatim" | "osm" => Some(NOMINATIM_SOURCE),
        _ => None,
    }
}

/// Writes the non-empty address fields of `address` into `estimate`.
pub fn apply_address(estimate: &mut LocationEstimate, address: &Address) {
    let pairs = [
        (&mut estimate.house_number, &address.house_number),
        (&mut estimate.road, &address.road),
        (&mut estimate.neighborhood, &address.neighborhood),
        (&mut estimate.suburb, &address.suburb),
        (&mut estimate.city, &address.city),
        (&mut estimate.postal_town, &address.postal_town),
        (&mut estimate.district, &address.district),
        (&mut estimate.state, &address.state),
        (&mut estimate.country, &address.country),
        (&mut estimate.country_code, &address.country_code),
        (&mut estimate.postal_code, &address.postal_code),
        (&mut estimate.formatted_address, &address.formatted_address),
    ];
    for (target, value) in pairs {
        if !value.is_empty() {
            target.clone_from(value);
        }
    }
}

/// Enriched copy of `estimate`: address attached, scores adjusted for the
/// tier that answered, coordinates unchanged.
pub fn enriched(
    mut estimate: LocationEstimate,
    geocode: &ReverseGeocode,
    tier: Tier,
    label: &str,
) -> LocationEstimate {
    apply_address(&mut estimate, &geocode.address);

    match (estimate.source_type, tier) {
        (SourceType::Ip, Tier::Primary) => {
            estimate.accuracy = (estimate.accuracy + PRIMARY_ACCURACY_BOOST).min(MAX_SCORE);
            estimate.confidence = (estimate.confidence + PRIMARY_CONFIDENCE_BOOST).min(MAX_SCORE);
        }
        (SourceType::Ip, Tier::Fallback) => {
            estimate.accuracy =
                (estimate.accuracy + FALLBACK_ACCURACY_BOOST).min(FALLBACK_ACCURACY_CAP);
        }
        (SourceType::Gps, Tier::Primary) => {
            estimate.accuracy = geocode.precision.unwrap_or(DEFAULT_GOOGLE_PRECISION);
            estimate.confidence = GPS_PRIMARY_CONFIDENCE;
        }
        (SourceType::Gps, Tier::Fallback) => {
            estimate.accuracy = GPS_FALLBACK_SCORE;
            estimate.confidence = GPS_FALLBACK_SCORE;
        }
    }

    estimate.provider = format!("{}+{}", estimate.provider, label);
    estimate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris_address() -> ReverseGeocode {
        ReverseGeocode {
            address: Address {
                city: "Paris".to_string(),
                country: "France".to_string(),
                country_code: "FR".to_string(),
                ..Default::default()
            },
            precision: Some(0.95),
        }
    }

    fn ip_estimate() -> LocationEstimate {
        LocationEstimate {
            lat: 48.85,
            lon: 2.35,
            accuracy: 0.62,
            confidence: 0.7,
            provider: "consensus-2".to_string(),
            state: "Ile-de-France".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn place_sources() {
        assert_eq!(geocoder_for_source("google_places"), Some("google_maps"));
        assert_eq!(geocoder_for_source(" Google_Maps "), Some("google_maps"));
        assert_eq!(geocoder_for_source("nominatim"), Some("nominatim"));
        assert_eq!(geocoder_for_source("bing"), None);
    }

    #[test]
    fn primary_nudges_ip_scores() {
        let out = enriched(ip_estimate(), &paris_address(), Tier::Primary, "google_maps");
        assert!((out.accuracy - 0.72).abs() < 1e-9);
        assert!((out.confidence - 0.75).abs() < 1e-9);
        assert_eq!(out.provider, "consensus-2+google_maps");
        assert_eq!(out.city, "Paris");
        assert_eq!(out.state, "Ile-de-France");
        assert_eq!((out.lat, out.lon), (48.85, 2.35));
    }

    #[test]
    fn fallback_caps_ip_accuracy_and_keeps_confidence() {
        let mut estimate = ip_estimate();
        estimate.accuracy = 0.93;
        let out = enriched(estimate, &paris_address(), Tier::Fallback, "nominatim");
        assert_eq!(out.accuracy, FALLBACK_ACCURACY_CAP);
        assert_eq!(out.confidence, 0.7);
        assert_eq!(out.provider, "consensus-2+nominatim");
    }

    #[test]
    fn gps_scores_come_from_the_geocoder() {
        let gps = LocationEstimate::from_coordinates(48.85, 2.35);
        let primary = enriched(gps.clone(), &paris_address(), Tier::Primary, "google_maps");
        assert_eq!(primary.accuracy, 0.95);
        assert_eq!(primary.confidence, 0.99);
        assert_eq!(primary.provider, "gps+google_maps");

        let fallback = enriched(gps, &paris_address(), Tier::Fallback, "nominatim");
        assert_eq!(fallback.accuracy, 0.90);
        assert_eq!(fallback.confidence, 0.90);
    }
}
