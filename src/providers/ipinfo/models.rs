// 3rd party crates
use serde::Deserialize;

/// Fields consumed from `GET /{ip}/json`.
#[derive(Debug, Deserialize)]
pub struct IpInfoResponse {
    /// `"lat,lon"`
    pub loc: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    /// Two-letter country code.
    pub country: Option<String>,
    pub postal: Option<String>,
    pub timezone: Option<String>,
    pub org: Option<String>,
    #[serde(default)]
    pub bogon: bool,
}
