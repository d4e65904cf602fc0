// 3rd party crates
use serde::Deserialize;

/// Response of the Geocoding API, forward and reverse alike.
#[derive(Debug, Deserialize)]
pub struct GoogleGeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GoogleResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleResult {
    #[serde(default)]
    pub address_components: Vec<GoogleComponent>,
    #[serde(default)]
    pub formatted_address: String,
    pub geometry: Option<GoogleGeometry>,
    #[serde(default)]
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleGeometry {
    pub location: Option<GoogleLatLng>,
    pub location_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GoogleComponent {
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}
