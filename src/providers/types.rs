// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::location::LocationEstimate;
use crate::utility::rate_limiter::RateLimitConfig;

// Current module imports
use super::constants::DEFAULT_PROVIDER_TIMEOUT_SECS;

/// The IP geolocation services the engine knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    IpInfo,
    IpApi,
    IpApiCom,
    IpGeolocation,
    MaxMind,
    IpStack,
    Ip2Location,
}

/// Coarse connection type derived from the network operator name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    Mobile,
    Broadband,
    Unknown,
}

/// Static per-provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// API key, token or licence key, depending on the provider.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Account identifier for services using basic auth.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Relative trust used by the consensus step.
    pub weight: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

/// A successful provider answer paired with that provider's weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub estimate: LocationEstimate,
    pub weight: f64,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_SECS
}
