//! Multi-provider IP geolocation with consensus.
//!
//! A [`LocationEngine`] queries every configured IP geolocation provider
//! concurrently, merges their answers into one estimate, attaches address
//! detail from a reverse geocoder and caches the outcome per session.

pub mod cache;
pub mod consensus;
pub mod engine;
pub mod enrichment;
pub mod location;
pub mod metrics;
pub mod orchestrator;
pub mod providers;
pub mod public_ip;
pub mod settings;
pub mod utility;

pub use engine::{EngineOptions, LocationEngine, LocationError};
pub use location::{format_address, LocationEstimate, PlaceSuggestion};
