// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::functions::de_lenient_f64;

/// Fields consumed from `GET /ipgeo`. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct IpGeolocationResponse {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub state_prov: Option<String>,
    pub district: Option<String>,
    pub country_name: Option<String>,
    pub country_code2: Option<String>,
    pub zipcode: Option<String>,
    pub isp: Option<String>,
    pub organization: Option<String>,
    pub time_zone: Option<IpGeolocationTimeZone>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IpGeolocationTimeZone {
    pub name: Option<String>,
}
