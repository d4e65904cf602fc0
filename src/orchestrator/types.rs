// Standard library
use std::sync::Arc;

// Project imports
use crate::metrics::ProviderMetrics;
use crate::providers::GeoProvider;
use crate::utility::rate_limiter::RateLimiter;

/// A provider together with its optional request quota.
#[derive(Clone)]
pub struct RegisteredProvider {
    pub provider: Arc<dyn GeoProvider>,
    pub limiter: Option<Arc<dyn RateLimiter>>,
}

/// Fans a lookup out to every enabled provider.
#[derive(Clone)]
pub struct ProviderOrchestrator {
    pub providers: Vec<RegisteredProvider>,
    pub metrics: ProviderMetrics,
}
