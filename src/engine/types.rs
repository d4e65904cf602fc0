// Standard library
use std::sync::Arc;
use std::time::Duration;

// Project imports
use crate::cache::SessionCache;
use crate::enrichment::EnrichmentChain;
use crate::orchestrator::ProviderOrchestrator;
use crate::public_ip::PublicIpResolver;

/// Tunables taken from the `[resolution]` and `[consensus]` settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    pub deadline: Duration,
    pub ip_accuracy_ceiling: f64,
    pub outlier_radius_km: Option<f64>,
}

/// Resolves caller locations: cache, public IP discovery, provider
/// fan-out, consensus, enrichment, in that order.
///
/// Built once and shared behind an `Arc`; every operation takes `&self`.
pub struct LocationEngine {
    pub(super) orchestrator: ProviderOrchestrator,
    pub(super) enrichment: EnrichmentChain,
    pub(super) cache: Arc<dyn SessionCache>,
    pub(super) public_ip: PublicIpResolver,
    pub(super) options: EngineOptions,
}
