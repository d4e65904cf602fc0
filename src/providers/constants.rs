pub const IPINFO_API_BASE: &str = "https://ipinfo.io";
pub const IPAPI_API_BASE: &str = "https://ipapi.co";
pub const IP_API_COM_BASE: &str = "http://ip-api.com";
pub const IPGEOLOCATION_API_BASE: &str = "https://api.ipgeolocation.io";
pub const MAXMIND_API_BASE: &str = "https://geoip.maxmind.com";
pub const IPSTACK_API_BASE: &str = "http://api.ipstack.com";
pub const IP2LOCATION_API_BASE: &str = "https://api.ip2location.io";

pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 5;

/// Base accuracy by connection type.
pub const MOBILE_BASE_ACCURACY: f64 = 0.35;
pub const BROADBAND_BASE_ACCURACY: f64 = 0.55;
pub const UNKNOWN_BASE_ACCURACY: f64 = 0.45;

pub const MIN_PROVIDER_ACCURACY: f64 = 0.05;
pub const MAX_PROVIDER_ACCURACY: f64 = 0.95;

pub const MOBILE_KEYWORDS: [&str; 11] = [
    "mobile", "wireless", "cellular", "lte", "4g", "5g", "gprs", "umts", "t-mobile", "vodafone",
    "mobil",
];

pub const BROADBAND_KEYWORDS: [&str; 12] = [
    "broadband",
    "cable",
    "fiber",
    "fibre",
    "dsl",
    "adsl",
    "ftth",
    "comcast",
    "telecom",
    "communications",
    "internet",
    "kabel",
];
