pub const CONFIG_PATH_ENV: &str = "GEOC_CONFIG_PATH";
pub const ENV_PREFIX: &str = "GEOC";
pub const ENV_SEPARATOR: &str = "__";
pub const CONFIG_DIR_NAME: &str = "geo-consensus";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_DEADLINE_SECS: u64 = 15;
pub const DEFAULT_IP_ACCURACY_CEILING: f64 = 0.70;

/// Conventional credential variables and the setting each one overrides.
pub const CREDENTIAL_ENV_VARS: [(&str, &str); 8] = [
    ("IPINFO_TOKEN", "providers.ipinfo.api_key"),
    ("IPGEOLOCATION_API_KEY", "providers.ipgeolocation.api_key"),
    ("MAXMIND_ACCOUNT_ID", "providers.maxmind.account_id"),
    ("MAXMIND_LICENSE_KEY", "providers.maxmind.api_key"),
    ("IPSTACK_API_KEY", "providers.ipstack.api_key"),
    ("IP2LOCATION_API_KEY", "providers.ip2location.api_key"),
    ("GOOGLE_MAPS_API_KEY", "geocoding.google_api_key"),
    ("REDIS_URL", "cache.redis_url"),
];

/// Example configuration
pub const DEFAULT_CONFIG: &str = r#"
# Logging configuration
[log]
# Level can be "error", "warn", "info", "debug", or "trace"
level = "info"

[resolution]
# Give up on an IP lookup after this many seconds
deadline_secs = 15
# IP-derived positions never report a higher accuracy than this
ip_accuracy_ceiling = 0.70

[consensus]
# Optional: discard provider answers further than this from the median point
# outlier_radius_km = 200.0

[cache]
# "redis", "memory" or "none"; redis falls back to none when unreachable
backend = "redis"
# Also read from REDIS_URL
# redis_url = "redis://127.0.0.1:6379/0"
ttl = 3600
connect_timeout_secs = 2

[geocoding]
# Also read from GOOGLE_MAPS_API_KEY; Nominatim alone is used without it
# google_api_key = "your_google_maps_key"
nominatim_url = "https://nominatim.openstreetmap.org"
timeout_secs = 10

# Geolocation providers. Weights are relative trust in each provider.
# Credentials can also come from the environment variables named below.

[providers.maxmind]
weight = 0.35
# MAXMIND_ACCOUNT_ID / MAXMIND_LICENSE_KEY
account_id = "your_account_id"
api_key = "your_license_key"

[providers.ipgeolocation]
weight = 0.25
# IPGEOLOCATION_API_KEY
api_key = "your_ipgeolocation_key"

[providers.ipinfo]
weight = 0.12
# IPINFO_TOKEN, optional

[providers.ipstack]
weight = 0.10
# IPSTACK_API_KEY
api_key = "your_ipstack_key"

[providers.ipapi]
weight = 0.07

[providers.ip_api]
weight = 0.07
# Free tier allows 45 requests per minute
rate_limit = { max_requests = 45, window_secs = 60 }

[providers.ip2location]
weight = 0.04
# IP2LOCATION_API_KEY
api_key = "your_ip2location_key"
"#;
