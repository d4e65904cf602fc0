// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::functions::de_lenient_f64;

/// Fields consumed from the ip2location.io JSON endpoint.
#[derive(Debug, Deserialize)]
pub struct Ip2LocationResponse {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub longitude: Option<f64>,
    pub city_name: Option<String>,
    pub region_name: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub zip_code: Option<String>,
    pub time_zone: Option<String>,
    #[serde(rename = "as")]
    pub autonomous_system: Option<String>,
    pub error: Option<Ip2LocationError>,
}

#[derive(Debug, Deserialize)]
pub struct Ip2LocationError {
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}
