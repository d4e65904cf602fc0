// Standard library
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

// 3rd party crates
use tokio::sync::RwLock;

/// Counters for a single geolocation provider
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProviderStats {
    /// Total number of lookups attempted
    pub attempts: u64,
    /// Number of lookups that produced an estimate
    pub successes: u64,
    /// Number of failed lookups, timeouts and quota hits included
    pub failures: u64,
    /// Number of lookups cut off by the provider timeout
    pub timeouts: u64,
    /// Number of upstream or local rate limit hits
    pub rate_limit_hits: u64,
    /// Last successful lookup time
    pub last_success: Option<Instant>,
    /// Last failure time
    pub last_failure: Option<Instant>,
    /// Message of the most recent failure
    pub last_error: Option<String>,
}

/// Thread-safe per-provider metrics
#[derive(Debug, Default, Clone)]
pub struct ProviderMetrics {
    stats: Arc<RwLock<HashMap<String, ProviderStats>>>,
}

impl ProviderMetrics {
    /// Creates an empty metrics registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that produced an estimate
    pub async fn record_success(&self, provider: &str) {
        let mut stats = self.stats.write().await;
        let entry = stats.entry(provider.to_string()).or_default();
        entry.attempts += 1;
        entry.successes += 1;
        entry.last_success = Some(Instant::now());
    }

    /// Records a failed lookup
    pub async fn record_failure(&self, provider: &str, error: String) {
        let mut stats = self.stats.write().await;
        let entry = stats.entry(provider.to_string()).or_default();
        entry.attempts += 1;
        entry.failures += 1;
        entry.last_failure = Some(Instant::now());
        entry.last_error = Some(error);
    }

    /// Records a timeout; call alongside `record_failure`
    pub async fn record_timeout(&self, provider: &str) {
        let mut stats = self.stats.write().await;
        stats.entry(provider.to_string()).or_default().timeouts += 1;
    }

    /// Records a rate limit hit; call alongside `record_failure`
    pub async fn record_rate_limit(&self, provider: &str) {
        let mut stats = self.stats.write().await;
        stats.entry(provider.to_string()).or_default().rate_limit_hits += 1;
    }

    /// Gets a snapshot of the current metrics
    pub async fn get_snapshot(&self) -> HashMap<String, ProviderStats> {
        self.stats.read().await.clone()
    }
}
