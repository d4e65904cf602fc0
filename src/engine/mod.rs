//! The public entry point: [`LocationEngine`].

pub mod errors;
pub mod impls;
pub mod types;

pub use errors::LocationError;
pub use types::{EngineOptions, LocationEngine};
