// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::functions::de_lenient_f64;

/// Fields consumed from `GET /{ip}/json/`.
#[derive(Debug, Deserialize)]
pub struct IpApiResponse {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
    pub org: Option<String>,
    #[serde(default)]
    pub error: bool,
    pub reason: Option<String>,
}
