// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::providers::functions::de_lenient_f64;

/// Fields consumed from `GET /{ip}`.
#[derive(Debug, Deserialize)]
pub struct IpStackResponse {
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub longitude: Option<f64>,
    pub city: Option<String>,
    pub region_name: Option<String>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub zip: Option<String>,
    pub connection: Option<IpStackConnection>,
    /// Present instead of data on failure, even with HTTP 200.
    pub error: Option<IpStackError>,
}

#[derive(Debug, Deserialize)]
pub struct IpStackConnection {
    pub isp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IpStackError {
    pub code: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub info: Option<String>,
}

impl IpStackError {
    pub fn describe(&self) -> String {
        let info = self
            .info
            .as_deref()
            .or(self.kind.as_deref())
            .unwrap_or("unknown error");
        match self.code {
            Some(code) => format!("error {}: {}", code, info),
            None => info.to_string(),
        }
    }
}
