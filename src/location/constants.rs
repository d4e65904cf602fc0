/// Returned by `format_address` when an estimate carries no address detail.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Separator between address parts.
pub const ADDRESS_SEPARATOR: &str = ", ";

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Upper bound for any score nudged upward by the pipeline.
pub const MAX_SCORE: f64 = 0.99;
