//! Concurrent provider fan-out.

pub mod errors;
pub mod functions;
pub mod impls;
pub mod types;

pub use errors::OrchestratorError;
pub use functions::build_providers;
pub use types::{ProviderOrchestrator, RegisteredProvider};
