//! IP geolocation provider adapters.
//!
//! Every adapter turns one upstream API's answer into a
//! [`LocationEstimate`](crate::location::LocationEstimate) and reports any
//! trouble as a [`ProviderError`]. Adapters that need a credential report
//! themselves disabled when it is missing, so the orchestrator skips them.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod traits;
pub mod types;

pub mod ip2location;
pub mod ip_api;
pub mod ipapi;
pub mod ipgeolocation;
pub mod ipinfo;
pub mod ipstack;
pub mod maxmind;

pub use errors::ProviderError;
pub use traits::GeoProvider;
pub use types::{NetworkKind, ProviderConfig, ProviderKind, ProviderResult};
