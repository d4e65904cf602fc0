//! Public IP discovery for callers that arrive from a private network.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod types;

pub use errors::PublicIpError;
pub use functions::{is_public, usable_public_ip};
pub use types::PublicIpResolver;
