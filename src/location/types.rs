// 3rd party crates
use serde::{Deserialize, Serialize};

/// How a coordinate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Inferred from a network address.
    #[default]
    Ip,
    /// Supplied directly by the caller.
    Gps,
}

/// A single location estimate with scores and optional address detail.
///
/// Text fields are empty when unknown; `accuracy_radius` is `0.0` when
/// unknown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationEstimate {
    pub lat: f64,
    pub lon: f64,
    /// Positional precision in `(0, 1]`.
    pub accuracy: f64,
    /// Trust in correctness in `[0, 1]`.
    pub confidence: f64,
    pub provider: String,
    pub source_type: SourceType,

    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub suburb: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub road: String,
    #[serde(default)]
    pub house_number: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub postal_town: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub timezone: String,
    /// Estimated error radius in metres.
    #[serde(default)]
    pub accuracy_radius: f64,
}

/// A forward-search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub name: String,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub place_id: String,
    pub source: String,
}
