// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::functions::de_lenient_f64;

pub const IP_API_FIELDS: &str =
    "status,message,lat,lon,city,regionName,country,countryCode,zip,isp,org,as,timezone";

/// Fields consumed from `GET /json/{ip}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpApiComResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub region_name: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub zip: Option<String>,
    pub isp: Option<String>,
    pub org: Option<String>,
    #[serde(rename = "as")]
    pub autonomous_system: Option<String>,
    pub timezone: Option<String>,
}

impl IpApiComResponse {
    /// First non-empty of isp, org and AS name.
    pub fn operator(&self) -> &str {
        [&self.isp, &self.org, &self.autonomous_system]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|value| !value.is_empty())
            .unwrap_or_default()
    }
}
