// Standard library
use std::fmt;
use std::time::Duration;

// Project imports
use crate::utility::rate_limiter::RateLimitConfig;

// Current module imports
use super::constants::DEFAULT_PROVIDER_TIMEOUT_SECS;
use super::types::{ProviderConfig, ProviderKind};

impl ProviderKind {
    pub const ALL: [ProviderKind; 7] = [
        ProviderKind::MaxMind,
        ProviderKind::IpGeolocation,
        ProviderKind::IpInfo,
        ProviderKind::IpStack,
        ProviderKind::IpApi,
        ProviderKind::IpApiCom,
        ProviderKind::Ip2Location,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::IpInfo => "ipinfo",
            ProviderKind::IpApi => "ipapi",
            ProviderKind::IpApiCom => "ip-api",
            ProviderKind::IpGeolocation => "ipgeolocation",
            ProviderKind::MaxMind => "maxmind",
            ProviderKind::IpStack => "ipstack",
            ProviderKind::Ip2Location => "ip2location",
        }
    }

    /// Table name under `[providers]` in the configuration file.
    pub fn config_key(&self) -> &'static str {
        match self {
            ProviderKind::IpApiCom => "ip_api",
            other => other.name(),
        }
    }

    /// Self-reported trust in the provider's answers.
    pub fn confidence(&self) -> f64 {
        match self {
            ProviderKind::MaxMind => 0.80,
            ProviderKind::IpGeolocation => 0.75,
            ProviderKind::IpInfo | ProviderKind::IpStack => 0.65,
            ProviderKind::IpApi | ProviderKind::Ip2Location => 0.60,
            ProviderKind::IpApiCom => 0.55,
        }
    }

    /// Added to the connection-type base accuracy.
    pub fn accuracy_bonus(&self) -> f64 {
        match self {
            ProviderKind::MaxMind => 0.15,
            ProviderKind::IpGeolocation => 0.10,
            ProviderKind::IpInfo | ProviderKind::IpStack => 0.05,
            ProviderKind::IpApi | ProviderKind::IpApiCom | ProviderKind::Ip2Location => 0.0,
        }
    }

    /// Typical error radius in metres.
    pub fn accuracy_radius(&self) -> f64 {
        match self {
            ProviderKind::MaxMind | ProviderKind::IpGeolocation => 50_000.0,
            ProviderKind::IpInfo | ProviderKind::IpStack => 75_000.0,
            ProviderKind::IpApi | ProviderKind::IpApiCom | ProviderKind::Ip2Location => 100_000.0,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(
            self,
            ProviderKind::IpGeolocation
                | ProviderKind::MaxMind
                | ProviderKind::IpStack
                | ProviderKind::Ip2Location
        )
    }

    pub fn default_weight(&self) -> f64 {
        match self {
            ProviderKind::MaxMind => 0.35,
            ProviderKind::IpGeolocation => 0.25,
            ProviderKind::IpInfo => 0.12,
            ProviderKind::IpStack => 0.10,
            ProviderKind::IpApi | ProviderKind::IpApiCom => 0.07,
            ProviderKind::Ip2Location => 0.04,
        }
    }

    /// Free tiers with published per-minute limits.
    pub fn default_rate_limit(&self) -> Option<RateLimitConfig> {
        match self {
            ProviderKind::IpApiCom => Some(RateLimitConfig {
                max_requests: 45,
                window_secs: 60,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ProviderConfig {
    /// Default settings for `kind`, without credentials.
    pub fn for_kind(kind: ProviderKind) -> Self {
        Self {
            enabled: true,
            api_key: None,
            account_id: None,
            weight: kind.default_weight(),
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            rate_limit: kind.default_rate_limit(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured key, ignoring blanks and the sample placeholder.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.starts_with("your_"))
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}
