pub const GOOGLE_GEOCODE_BASE: &str = "https://maps.googleapis.com/maps/api/geocode";
pub const NOMINATIM_BASE: &str = "https://nominatim.openstreetmap.org";

pub const GOOGLE_SOURCE: &str = "google_maps";
pub const NOMINATIM_SOURCE: &str = "nominatim";

pub const DEFAULT_USER_AGENT: &str = concat!("geo-consensus/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;

/// Provider label of estimates resolved from a place id.
pub const PLACE_PROVIDER: &str = "place";

pub const SEARCH_LIMIT: usize = 5;
pub const MIN_QUERY_LEN: usize = 2;

/// Score nudges for IP-derived estimates.
pub const PRIMARY_ACCURACY_BOOST: f64 = 0.10;
pub const PRIMARY_CONFIDENCE_BOOST: f64 = 0.05;
pub const FALLBACK_ACCURACY_BOOST: f64 = 0.05;
pub const FALLBACK_ACCURACY_CAP: f64 = 0.95;

/// Scores for caller-supplied coordinates.
pub const GPS_PRIMARY_CONFIDENCE: f64 = 0.99;
pub const GPS_FALLBACK_SCORE: f64 = 0.90;

/// Precision when Google omits or sends an unknown `location_type`.
pub const DEFAULT_GOOGLE_PRECISION: f64 = 0.85;
