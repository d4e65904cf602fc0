//! Reconciles per-provider answers into a single location estimate.
//!
//! Coordinates are a weighted mean (weight = provider weight × confidence),
//! falling back to a per-axis median when every weight is zero. Accuracy
//! reflects how far the worst input sits from the merged point.

pub mod constants;
pub mod errors;
pub mod functions;

pub use errors::ConsensusError;
pub use functions::{haversine_km, merge, reject_outliers};
