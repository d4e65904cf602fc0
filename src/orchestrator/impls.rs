// Standard library
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

// 3rd party crates
use tokio::task::{Id, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

// Project imports
use crate::metrics::ProviderMetrics;
use crate::providers::{GeoProvider, ProviderError, ProviderResult};
use crate::utility::rate_limiter::{RateLimiter, TokenBucketRateLimiter};

// Current module imports
use super::errors::OrchestratorError;
use super::types::{ProviderOrchestrator, RegisteredProvider};

impl ProviderOrchestrator {
    /// Registers `providers`, giving each configured quota its own limiter.
    pub fn new(providers: Vec<Arc<dyn GeoProvider>>, metrics: ProviderMetrics) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| {
                let limiter = provider.config().rate_limit.map(|quota| {
                    Arc::new(TokenBucketRateLimiter::new(quota)) as Arc<dyn RateLimiter>
                });
                RegisteredProvider { provider, limiter }
            })
            .collect::<Vec<_>>();

        let enabled: Vec<&str> = providers
            .iter()
            .filter(|p| p.provider.is_enabled())
            .map(|p| p.provider.get_name())
            .collect();
        info!(providers = ?enabled, "Geolocation providers enabled");

        Self { providers, metrics }
    }

    pub fn enabled_count(&self) -> usize {
        self.providers
            .iter()
            .filter(|p| p.provider.is_enabled())
            .count()
    }

    /// Queries every enabled provider concurrently.
    ///
    /// Waits for all tasks to finish or time out. Failed providers are
    /// logged, counted and left out; the call fails only when none succeed
    /// or when `cancel` fires, in which case in-flight tasks are aborted.
    pub async fn query_all(
        &self,
        ip: &IpAddr,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProviderResult>, OrchestratorError> {
        let mut tasks = JoinSet::new();
        let mut names: HashMap<Id, String> = HashMap::new();

        for registered in self.providers.iter().filter(|p| p.provider.is_enabled()) {
            let provider = Arc::clone(&registered.provider);
            let limiter = registered.limiter.clone();
            let ip = *ip;
            let name = provider.get_name().to_string();
            let handle = tasks.spawn(async move {
                let weight = provider.config().weight;
                (weight, query_one(provider.as_ref(), limiter.as_deref(), &ip).await)
            });
            names.insert(handle.id(), name);
        }

        let mut results = Vec::with_capacity(tasks.len());
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tasks.abort_all();
                    warn!("Provider queries cancelled");
                    return Err(OrchestratorError::Cancelled);
                }
                joined = tasks.join_next_with_id() => match joined {
                    None => break,
                    Some(Ok((id, (weight, outcome)))) => {
                        let name = names.remove(&id).unwrap_or_default();
                        match outcome {
                            Ok(estimate) => {
                                debug!(provider = %name, lat = estimate.lat, lon = estimate.lon, "Provider answered");
                                self.metrics.record_success(&name).await;
                                results.push(ProviderResult { estimate, weight });
                            }
                            Err(e) => {
                                warn!(provider = %name, error = %e, "Provider failed");
                                self.record_failure(&name, &e).await;
                            }
                        }
                    }
                    Some(Err(e)) => {
                        let name = names.remove(&e.id()).unwrap_or_else(|| "unknown".to_string());
                        error!(provider = %name, error = %e, "Provider task did not complete");
                        self.metrics
                            .record_failure(&name, format!("task did not complete: {}", e))
                            .await;
                    }
                }
            }
        }

        if results.is_empty() {
            error!("All geolocation providers failed");
            return Err(OrchestratorError::AllProvidersFailed);
        }
        info!(succeeded = results.len(), "Collected provider results");
        Ok(results)
    }

    async fn record_failure(&self, name: &str, error: &ProviderError) {
        if error.is_timeout() {
            self.metrics.record_timeout(name).await;
        }
        if error.is_rate_limited() {
            self.metrics.record_rate_limit(name).await;
        }
        self.metrics.record_failure(name, error.to_string()).await;
    }
}

async fn query_one(
    provider: &dyn GeoProvider,
    limiter: Option<&dyn RateLimiter>,
    ip: &IpAddr,
) -> Result<crate::location::LocationEstimate, ProviderError> {
    let name = provider.get_name();
    if let Some(limiter) = limiter {
        if !limiter.acquire().await {
            return Err(ProviderError::QuotaExhausted(name.to_string()));
        }
    }

    let timeout = provider.config().timeout();
    match tokio::time::timeout(timeout, provider.locate(ip)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ProviderError::Timeout {
            provider: name.to_string(),
            secs: timeout.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationEstimate;
    use crate::providers::{ProviderConfig, ProviderKind};
    use crate::utility::rate_limiter::RateLimitConfig;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FakeProvider {
        name: &'static str,
        config: ProviderConfig,
        answer: Option<(f64, f64)>,
        delay: Duration,
        panics: bool,
    }

    impl FakeProvider {
        fn new(name: &'static str, answer: Option<(f64, f64)>) -> Self {
            let mut config = ProviderConfig::for_kind(ProviderKind::IpInfo);
            config.rate_limit = None;
            Self {
                name,
                config,
                answer,
                delay: Duration::ZERO,
                panics: false,
            }
        }
    }

    #[async_trait]
    impl GeoProvider for FakeProvider {
        async fn locate(&self, _ip: &IpAddr) -> Result<LocationEstimate, ProviderError> {
            tokio::time::sleep(self.delay).await;
            if self.panics {
                panic!("{} client crashed", self.name);
            }
            match self.answer {
                Some((lat, lon)) => Ok(LocationEstimate {
                    lat,
                    lon,
                    accuracy: 0.5,
                    confidence: 0.7,
                    provider: self.name.to_string(),
                    ..Default::default()
                }),
                None => Err(ProviderError::HttpStatus {
                    provider: self.name.to_string(),
                    status: 500,
                }),
            }
        }

        fn config(&self) -> &ProviderConfig {
            &self.config
        }

        fn is_enabled(&self) -> bool {
            self.config.enabled
        }

        fn get_name(&self) -> &str {
            self.name
        }
    }

    fn orchestrator(providers: Vec<FakeProvider>) -> ProviderOrchestrator {
        ProviderOrchestrator::new(
            providers
                .into_iter()
                .map(|p| Arc::new(p) as Arc<dyn GeoProvider>)
                .collect(),
            ProviderMetrics::new(),
        )
    }

    fn ip() -> IpAddr {
        "8.8.8.8".parse().unwrap()
    }

    #[tokio::test]
    async fn one_success_is_enough() {
        let orchestrator = orchestrator(vec![
            FakeProvider::new("a", None),
            FakeProvider::new("b", Some((48.85, 2.35))),
            FakeProvider::new("c", None),
        ]);

        let results = orchestrator
            .query_all(&ip(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].estimate.provider, "b");

        let snapshot = orchestrator.metrics.get_snapshot().await;
        assert_eq!(snapshot["a"].failures, 1);
        assert_eq!(snapshot["b"].successes, 1);
    }

    #[tokio::test]
    async fn zero_successes_fail() {
        let orchestrator = orchestrator(vec![FakeProvider::new("a", None), FakeProvider::new("b", None)]);
        assert_eq!(
            orchestrator.query_all(&ip(), &CancellationToken::new()).await,
            Err(OrchestratorError::AllProvidersFailed)
        );
    }

    #[tokio::test]
    async fn nothing_enabled_fails() {
        let mut disabled = FakeProvider::new("a", Some((1.0, 1.0)));
        disabled.config.enabled = false;
        let orchestrator = orchestrator(vec![disabled]);
        assert_eq!(orchestrator.enabled_count(), 0);
        assert_eq!(
            orchestrator.query_all(&ip(), &CancellationToken::new()).await,
            Err(OrchestratorError::AllProvidersFailed)
        );
    }

    #[tokio::test]
    async fn panicked_provider_is_counted_as_failure() {
        let mut crashing = FakeProvider::new("crashing", Some((1.0, 1.0)));
        crashing.panics = true;
        let orchestrator = orchestrator(vec![crashing, FakeProvider::new("steady", Some((2.0, 2.0)))]);

        let results = orchestrator
            .query_all(&ip(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);

        let snapshot = orchestrator.metrics.get_snapshot().await;
        assert_eq!(snapshot["crashing"].attempts, 1);
        assert_eq!(snapshot["crashing"].failures, 1);
        assert!(snapshot["crashing"]
            .last_error
            .as_deref()
            .unwrap_or_default()
            .contains("did not complete"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out_without_blocking_others() {
        let mut slow = FakeProvider::new("slow", Some((1.0, 1.0)));
        slow.config.timeout_secs = 1;
        slow.delay = Duration::from_secs(30);
        let orchestrator = orchestrator(vec![slow, FakeProvider::new("fast", Some((2.0, 2.0)))]);

        let results = orchestrator
            .query_all(&ip(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].estimate.provider, "fast");

        let snapshot = orchestrator.metrics.get_snapshot().await;
        assert_eq!(snapshot["slow"].timeouts, 1);
        assert_eq!(snapshot["slow"].failures, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_and_fails() {
        let mut slow = FakeProvider::new("slow", Some((1.0, 1.0)));
        slow.delay = Duration::from_secs(3);
        let orchestrator = orchestrator(vec![slow]);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        assert_eq!(
            orchestrator.query_all(&ip(), &cancel).await,
            Err(OrchestratorError::Cancelled)
        );
        assert!(orchestrator.metrics.get_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn exhausted_quota_skips_provider() {
        let mut limited = FakeProvider::new("limited", Some((1.0, 1.0)));
        limited.config.rate_limit = Some(RateLimitConfig {
            max_requests: 1,
            window_secs: 3600,
        });
        let orchestrator = orchestrator(vec![limited, FakeProvider::new("other", Some((2.0, 2.0)))]);
        let cancel = CancellationToken::new();

        assert_eq!(orchestrator.query_all(&ip(), &cancel).await.unwrap().len(), 2);

        let second = orchestrator.query_all(&ip(), &cancel).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].estimate.provider, "other");

        let snapshot = orchestrator.metrics.get_snapshot().await;
        assert_eq!(snapshot["limited"].rate_limit_hits, 1);
        assert!(snapshot["limited"]
            .last_error
            .as_deref()
            .unwrap_or_default()
            .contains("quota"));
    }
}
