// Standard library
use std::path::PathBuf;

// 3rd party crates
use serde::Deserialize;

// Project imports
use crate::cache::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_SESSION_TTL_SECS};
use crate::enrichment::constants::{DEFAULT_GEOCODER_TIMEOUT_SECS, DEFAULT_USER_AGENT, NOMINATIM_BASE};
use crate::providers::{ProviderConfig, ProviderKind};

// Current module imports
use super::constants::{DEFAULT_DEADLINE_SECS, DEFAULT_IP_ACCURACY_CEILING};

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Limits applied to a whole resolution.
#[derive(Debug, Deserialize, Clone)]
pub struct Resolution {
    /// Outer deadline for an IP resolution, in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    /// Highest accuracy an IP-derived estimate may report after enrichment.
    #[serde(default = "default_ip_accuracy_ceiling")]
    pub ip_accuracy_ceiling: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Consensus {
    /// Drop provider answers further than this from the median point.
    #[serde(default)]
    pub outlier_radius_km: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
    None,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Cache {
    #[serde(default)]
    pub backend: CacheBackend,
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Session entry lifetime in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Geocoding {
    #[serde(default)]
    pub google_api_key: Option<String>,
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    /// Sent to Nominatim, whose usage policy requires one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocoder_timeout_secs")]
    pub timeout_secs: u64,
}

/// One table per provider under `[providers]`.
#[derive(Debug, Deserialize, Clone)]
pub struct Providers {
    #[serde(default = "default_ipinfo")]
    pub ipinfo: ProviderConfig,
    #[serde(default = "default_ipapi")]
    pub ipapi: ProviderConfig,
    #[serde(default = "default_ip_api")]
    pub ip_api: ProviderConfig,
    #[serde(default = "default_ipgeolocation")]
    pub ipgeolocation: ProviderConfig,
    #[serde(default = "default_maxmind")]
    pub maxmind: ProviderConfig,
    #[serde(default = "default_ipstack")]
    pub ipstack: ProviderConfig,
    #[serde(default = "default_ip2location")]
    pub ip2location: ProviderConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default)]
    pub consensus: Consensus,
    #[serde(default)]
    pub cache: Cache,
    #[serde(default)]
    pub geocoding: Geocoding,
    #[serde(default)]
    pub providers: Providers,
}

/// Settings that passed [`Settings::validate`].
#[derive(Debug, Clone)]
pub struct ValidatedSettings(pub(super) Settings);

/// Loads settings from the configuration file and the environment.
#[derive(Debug)]
pub struct ConfigManager {
    pub settings: ValidatedSettings,
    pub config_path: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_deadline_secs() -> u64 {
    DEFAULT_DEADLINE_SECS
}

fn default_ip_accuracy_ceiling() -> f64 {
    DEFAULT_IP_ACCURACY_CEILING
}

fn default_cache_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_nominatim_url() -> String {
    NOMINATIM_BASE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_geocoder_timeout_secs() -> u64 {
    DEFAULT_GEOCODER_TIMEOUT_SECS
}

fn default_ipinfo() -> ProviderConfig {
    ProviderConfig::for_kind(ProviderKind::IpInfo)
}

fn default_ipapi() -> ProviderConfig {
    ProviderConfig::for_kind(ProviderKind::IpApi)
}

fn default_ip_api() -> ProviderConfig {
    ProviderConfig::for_kind(ProviderKind::IpApiCom)
}

fn default_ipgeolocation() -> ProviderConfig {
    ProviderConfig::for_kind(ProviderKind::IpGeolocation)
}

fn default_maxmind() -> ProviderConfig {
    ProviderConfig::for_kind(ProviderKind::MaxMind)
}

fn default_ipstack() -> ProviderConfig {
    ProviderConfig::for_kind(ProviderKind::IpStack)
}

fn default_ip2location() -> ProviderConfig {
    ProviderConfig::for_kind(ProviderKind::Ip2Location)
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline_secs(),
            ip_accuracy_ceiling: default_ip_accuracy_ceiling(),
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: None,
            ttl: default_cache_ttl(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for Geocoding {
    fn default() -> Self {
        Self {
            google_api_key: None,
            nominatim_url: default_nominatim_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_geocoder_timeout_secs(),
        }
    }
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            ipinfo: default_ipinfo(),
            ipapi: default_ipapi(),
            ip_api: default_ip_api(),
            ipgeolocation: default_ipgeolocation(),
            maxmind: default_maxmind(),
            ipstack: default_ipstack(),
            ip2location: default_ip2location(),
        }
    }
}
