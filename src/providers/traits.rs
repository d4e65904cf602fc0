// Standard library
use std::net::IpAddr;

// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::location::LocationEstimate;

// Current module imports
use super::errors::ProviderError;
use super::types::ProviderConfig;

/// Core trait that all IP geolocation providers must implement.
///
/// # Implementation Requirements
///
/// Implementors must:
/// - Map the upstream response into a [`LocationEstimate`] with
///   `source_type = ip`
/// - Treat a response without coordinates as a hard failure, and missing
///   optional detail as empty strings
/// - Report every failure as a [`ProviderError`]
/// - Report themselves disabled when a required credential is absent
///
/// Timeouts and request quotas are enforced by the orchestrator, not by the
/// adapter.
///
/// # Example Implementation
///
/// ```rust
/// # use async_trait::async_trait;
/// # use std::net::IpAddr;
/// # use geo_consensus::location::LocationEstimate;
/// # use geo_consensus::providers::{GeoProvider, ProviderConfig, ProviderError, ProviderKind};
/// struct FixedProvider {
///     config: ProviderConfig,
/// }
///
/// #[async_trait]
/// impl GeoProvider for FixedProvider {
///     async fn locate(&self, _ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
///         Ok(LocationEstimate {
///             lat: 48.85,
///             lon: 2.35,
///             accuracy: 0.5,
///             confidence: 0.5,
///             provider: "fixed".to_string(),
///             ..Default::default()
///         })
///     }
///
///     fn config(&self) -> &ProviderConfig {
///         &self.config
///     }
///
///     fn is_enabled(&self) -> bool {
///         true
///     }
///
///     fn get_name(&self) -> &str {
///         "fixed"
///     }
/// }
/// ```
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Looks up `ip` and returns the provider's estimate.
    async fn locate(&self, ip: &IpAddr) -> Result<LocationEstimate, ProviderError>;

    /// Static settings: weight, timeout, quota and credentials.
    fn config(&self) -> &ProviderConfig;

    /// Checks if the provider is enabled and has the credentials it needs.
    fn is_enabled(&self) -> bool;

    /// Gets the provider's name.
    ///
    /// This name should be lowercase, without spaces and unique across all
    /// providers; it is used in logs, metrics and the estimate's
    /// `provider` label.
    fn get_name(&self) -> &str;
}
