// Standard library
use std::collections::HashMap;

// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::functions::de_lenient_f64;

/// Fields consumed from the GeoIP2 City web service.
#[derive(Debug, Deserialize)]
pub struct MaxMindCityResponse {
    pub city: Option<MaxMindNamed>,
    #[serde(default)]
    pub subdivisions: Vec<MaxMindNamed>,
    pub country: Option<MaxMindCountry>,
    pub postal: Option<MaxMindPostal>,
    pub location: Option<MaxMindLocation>,
    pub traits: Option<MaxMindTraits>,
}

#[derive(Debug, Deserialize)]
pub struct MaxMindNamed {
    #[serde(default)]
    pub names: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct MaxMindCountry {
    pub iso_code: Option<String>,
    #[serde(default)]
    pub names: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct MaxMindPostal {
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MaxMindLocation {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub longitude: Option<f64>,
    /// Kilometres.
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub accuracy_radius: Option<f64>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MaxMindTraits {
    pub isp: Option<String>,
    pub organization: Option<String>,
    pub autonomous_system_organization: Option<String>,
}

impl MaxMindNamed {
    pub fn english(&self) -> String {
        self.names.get("en").cloned().unwrap_or_default()
    }
}

impl MaxMindTraits {
    pub fn operator(&self) -> &str {
        [
            &self.isp,
            &self.organization,
            &self.autonomous_system_organization,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
    }
}
