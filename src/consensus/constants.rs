/// Upper bound on merged confidence.
pub const MAX_CONSENSUS_CONFIDENCE: f64 = 0.99;

/// Floor for the agreement-derived accuracy.
pub const MIN_CONSENSUS_ACCURACY: f64 = 0.1;

/// Accuracy lost per degree of worst-case spread.
pub const SPREAD_PENALTY: f64 = 10.0;

/// Outlier rejection needs at least this many inputs.
pub const MIN_INPUTS_FOR_OUTLIERS: usize = 3;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const CONSENSUS_PROVIDER_PREFIX: &str = "consensus-";
