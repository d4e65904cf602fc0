// 3rd party crates
use serde::Deserialize;
use serde_json::Value;

// Project imports
use crate::providers::functions::de_lenient_f64;

/// `GET /reverse` body. Nominatim answers 200 with `error` when nothing is
/// found at the coordinate.
#[derive(Debug, Deserialize)]
pub struct NominatimReverse {
    #[serde(default)]
    pub address: NominatimAddress,
    #[serde(default)]
    pub display_name: String,
    pub error: Option<String>,
}

/// One element of the `GET /search` array.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub place_id: Option<Value>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NominatimAddress {
    pub house_number: String,
    pub road: String,
    pub neighbourhood: String,
    pub residential: String,
    pub suburb: String,
    pub city_district: String,
    pub city: String,
    pub town: String,
    pub village: String,
    pub municipality: String,
    pub county: String,
    pub state: String,
    pub region: String,
    pub country: String,
    pub country_code: String,
    pub postcode: String,
}

/// `GET /details` body. Coordinates sit in a GeoJSON point, `[lon, lat]`,
/// and the address is a list of named parts ordered most specific first.
#[derive(Debug, Deserialize)]
pub struct NominatimDetails {
    pub centroid: Option<NominatimPoint>,
    #[serde(default)]
    pub localname: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub calculated_postcode: String,
    #[serde(default)]
    pub address: Vec<NominatimAddressPart>,
}

#[derive(Debug, Deserialize)]
pub struct NominatimPoint {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct NominatimAddressPart {
    #[serde(default)]
    pub localname: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub rank_address: u8,
    #[serde(default)]
    pub isaddress: bool,
}

impl NominatimPoint {
    pub fn lat_lon(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lon, lat] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

impl NominatimAddress {
    /// City, town, village or municipality, whichever is set first.
    pub fn settlement(&self) -> &str {
        first_non_empty(&[&self.city, &self.town, &self.village, &self.municipality])
    }
}

impl NominatimPlace {
    pub fn place_id(&self) -> String {
        match &self.place_id {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

pub fn first_non_empty<'a>(values: &[&'a String]) -> &'a str {
    values
        .iter()
        .map(|value| value.as_str())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}
