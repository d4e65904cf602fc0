// 3rd party crates
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use tracing::trace;

// Project imports
use crate::location::{validate_coordinates, LocationEstimate, SourceType};

// Current module imports
use super::constants::{
    BROADBAND_BASE_ACCURACY, BROADBAND_KEYWORDS, MAX_PROVIDER_ACCURACY, MIN_PROVIDER_ACCURACY,
    MOBILE_BASE_ACCURACY, MOBILE_KEYWORDS, UNKNOWN_BASE_ACCURACY,
};
use super::errors::ProviderError;
use super::types::{NetworkKind, ProviderKind};

/// Buckets a network operator name ("AS3215 Orange S.A.", "T-Mobile USA")
/// by connection type. Mobile keywords are checked first.
pub fn classify_network(operator: &str) -> NetworkKind {
    let operator = operator.to_lowercase();
    if operator.is_empty() {
        NetworkKind::Unknown
    } else if MOBILE_KEYWORDS.iter().any(|kw| operator.contains(kw)) {
        NetworkKind::Mobile
    } else if BROADBAND_KEYWORDS.iter().any(|kw| operator.contains(kw)) {
        NetworkKind::Broadband
    } else {
        NetworkKind::Unknown
    }
}

/// Accuracy from the connection type plus the provider's reliability bonus.
pub fn estimate_accuracy(operator: &str, kind: ProviderKind) -> f64 {
    let base = match classify_network(operator) {
        NetworkKind::Mobile => MOBILE_BASE_ACCURACY,
        NetworkKind::Broadband => BROADBAND_BASE_ACCURACY,
        NetworkKind::Unknown => UNKNOWN_BASE_ACCURACY,
    };
    (base + kind.accuracy_bonus()).clamp(MIN_PROVIDER_ACCURACY, MAX_PROVIDER_ACCURACY)
}

/// Starting estimate for a provider answer; adapters fill in the address.
pub fn base_estimate(kind: ProviderKind, lat: f64, lon: f64, operator: &str) -> LocationEstimate {
    LocationEstimate {
        lat,
        lon,
        accuracy: estimate_accuracy(operator, kind),
        confidence: kind.confidence(),
        provider: kind.name().to_string(),
        source_type: SourceType::Ip,
        accuracy_radius: kind.accuracy_radius(),
        ..Default::default()
    }
}

/// Sends `request` and decodes a JSON body.
///
/// 429 and non-JSON bodies mentioning a rate limit map to `RateLimited`.
pub async fn fetch_json<T: DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(|e| ProviderError::Network {
        provider: provider.to_string(),
        source: e,
    })?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited(provider.to_string()));
    }
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = response.text().await.map_err(|e| ProviderError::Network {
        provider: provider.to_string(),
        source: e,
    })?;

    trace!(provider = %provider, body = %body, "Received provider response");

    if !content_type.contains("json") {
        if body.to_lowercase().contains("rate") {
            return Err(ProviderError::RateLimited(provider.to_string()));
        }
        return Err(ProviderError::UnexpectedContentType {
            provider: provider.to_string(),
            content_type,
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Parse {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}

/// Both coordinates must be present and in range.
pub fn require_coordinates(
    provider: &str,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<(f64, f64), ProviderError> {
    let lat = lat.ok_or_else(|| ProviderError::MissingField {
        provider: provider.to_string(),
        field: "latitude",
    })?;
    let lon = lon.ok_or_else(|| ProviderError::MissingField {
        provider: provider.to_string(),
        field: "longitude",
    })?;

    if !validate_coordinates(lat, lon) {
        return Err(ProviderError::Parse {
            provider: provider.to_string(),
            message: format!("coordinates out of range: {}, {}", lat, lon),
        });
    }

    Ok((lat, lon))
}

/// Accepts `12.5`, `"12.5"` or `null` for optional numeric fields. A blank
/// string counts as absent; any other non-numeric string is an error.
pub fn de_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(value)) => Some(value),
        Some(NumberOrString::Text(text)) => match text.trim() {
            "" => None,
            trimmed => Some(trimmed.parse().map_err(|_| {
                de::Error::custom(format!("invalid number '{}'", trimmed))
            })?),
        },
        None => None,
    })
}
