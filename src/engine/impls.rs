// Standard library
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// 3rd party crates
use reqwest::Client;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

// Project imports
use crate::cache::{self, SessionCache};
use crate::consensus::{merge, reject_outliers};
use crate::enrichment::constants::MIN_QUERY_LEN;
use crate::enrichment::{
    EnrichmentChain, GeocodeError, Geocoder, GoogleGeocoder, NominatimGeocoder,
};
use crate::location::{validate_coordinates, LocationEstimate, PlaceSuggestion};
use crate::metrics::{ProviderMetrics, ProviderStats};
use crate::orchestrator::{build_providers, ProviderOrchestrator};
use crate::public_ip::{usable_public_ip, PublicIpResolver};
use crate::settings::Settings;

// Current module imports
use super::errors::LocationError;
use super::types::{EngineOptions, LocationEngine};

impl EngineOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            deadline: Duration::from_secs(settings.resolution.deadline_secs),
            ip_accuracy_ceiling: settings.resolution.ip_accuracy_ceiling,
            outlier_radius_km: settings.consensus.outlier_radius_km,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl fmt::Debug for LocationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationEngine")
            .field("providers", &self.orchestrator.enabled_count())
            .field("enrichment", &self.enrichment)
            .field("cache", &self.cache.get_name())
            .field("options", &self.options)
            .finish()
    }
}

impl LocationEngine {
    pub fn new(
        orchestrator: ProviderOrchestrator,
        enrichment: EnrichmentChain,
        cache: Arc<dyn SessionCache>,
        public_ip: PublicIpResolver,
        options: EngineOptions,
    ) -> Self {
        Self {
            orchestrator,
            enrichment,
            cache,
            public_ip,
            options,
        }
    }

    /// Wires every component from validated settings and connects the
    /// session cache.
    pub async fn from_settings(settings: &Settings) -> Result<Self, LocationError> {
        let client = Client::builder()
            .user_agent(settings.geocoding.user_agent.as_str())
            .build()?;

        let orchestrator = ProviderOrchestrator::new(
            build_providers(&settings.providers, &client),
            ProviderMetrics::new(),
        );

        let geocoder_timeout = Duration::from_secs(settings.geocoding.timeout_secs);
        let primary = settings.geocoding.google_api_key().map(|key| {
            Arc::new(GoogleGeocoder::new(key, client.clone()).with_timeout(geocoder_timeout))
                as Arc<dyn Geocoder>
        });
        let fallback: Arc<dyn Geocoder> = Arc::new(
            NominatimGeocoder::new(client.clone())
                .with_base_url(settings.geocoding.nominatim_url.trim_end_matches('/'))
                .with_user_agent(settings.geocoding.user_agent.as_str())
                .with_timeout(geocoder_timeout),
        );
        if primary.is_none() {
            info!("No Google Maps key configured, enriching with Nominatim only");
        }

        let cache = cache::connect(&settings.cache).await;

        Ok(Self::new(
            orchestrator,
            EnrichmentChain::new(primary, Some(fallback)),
            cache,
            PublicIpResolver::new(client),
            EngineOptions::from_settings(settings),
        ))
    }

    /// Resolves a caller's location from their IP address.
    ///
    /// A cached entry for `session_id` is returned as is. A missing or
    /// non-public `ip` triggers public IP discovery. The deadline bounds
    /// discovery and the provider fan-out; enrichment gets whatever time is
    /// left. Enrichment failure, including running out of time, is not an
    /// error: the consensus estimate is returned without address detail.
    pub async fn resolve_from_ip(
        &self,
        ip: Option<&str>,
        session_id: Option<&str>,
    ) -> Result<LocationEstimate, LocationError> {
        self.resolve_from_ip_with_cancel(ip, session_id, &CancellationToken::new())
            .await
    }

    /// Like [`resolve_from_ip`](Self::resolve_from_ip), aborting with
    /// `Cancelled` as soon as `cancel` fires.
    pub async fn resolve_from_ip_with_cancel(
        &self,
        ip: Option<&str>,
        session_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<LocationEstimate, LocationError> {
        let session_id = session_id.map(str::trim).filter(|id| !id.is_empty());

        if let Some(session) = session_id {
            if let Some(cached) = self.cache.get(session).await {
                debug!(session = %session, provider = %cached.provider, "Session cache hit");
                return Ok(cached);
            }
        }

        let deadline = self.options.deadline;
        let started = Instant::now();
        let merged = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Location resolution cancelled");
                return Err(LocationError::Cancelled);
            }
            outcome = tokio::time::timeout(deadline, self.consensus_estimate(ip, cancel)) => {
                match outcome {
                    Ok(result) => result?,
                    Err(_) => {
                        warn!(deadline_secs = deadline.as_secs(), "Location resolution timed out");
                        return Err(LocationError::DeadlineExceeded(deadline.as_secs()));
                    }
                }
            }
        };

        let remaining = deadline.saturating_sub(started.elapsed());
        let enrichment = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Location resolution cancelled during enrichment");
                return Err(LocationError::Cancelled);
            }
            outcome = tokio::time::timeout(remaining, self.enrichment.enrich(&merged)) => outcome,
        };
        let mut estimate = match enrichment {
            Ok(Ok(enriched)) => enriched,
            Ok(Err(e)) => {
                warn!(error = %e, "Enrichment failed, returning consensus estimate");
                merged
            }
            Err(_) => {
                warn!(
                    remaining_ms = remaining.as_millis() as u64,
                    "Enrichment ran out of time, returning consensus estimate"
                );
                merged
            }
        };
        estimate.accuracy = estimate.accuracy.min(self.options.ip_accuracy_ceiling);

        if let Some(session) = session_id {
            self.cache.put(session, &estimate).await;
        }

        info!(
            provider = %estimate.provider,
            lat = estimate.lat,
            lon = estimate.lon,
            accuracy = estimate.accuracy,
            "Resolved location from IP"
        );
        Ok(estimate)
    }

    /// Public IP discovery, provider fan-out and merge; everything the
    /// deadline covers.
    async fn consensus_estimate(
        &self,
        ip: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<LocationEstimate, LocationError> {
        let ip = match usable_public_ip(ip) {
            Some(ip) => ip,
            None => {
                debug!(caller_ip = ?ip, "Caller address is not public, discovering public IP");
                self.public_ip.resolve().await?
            }
        };

        let mut results = self.orchestrator.query_all(&ip, cancel).await?;
        if let Some(radius) = self.options.outlier_radius_km {
            results = reject_outliers(results, radius);
        }
        Ok(merge(&results)?)
    }

    /// Resolves caller-supplied coordinates into an address.
    ///
    /// Out-of-range or non-finite coordinates fail before any network call;
    /// unlike the IP path, failing to find an address is an error.
    pub async fn resolve_from_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<LocationEstimate, LocationError> {
        if !validate_coordinates(lat, lon) {
            return Err(LocationError::InvalidCoordinates { lat, lon });
        }

        let estimate = self
            .enrichment
            .enrich(&LocationEstimate::from_coordinates(lat, lon))
            .await
            .map_err(|e| LocationError::EnrichmentFailed(e.to_string()))?;

        info!(provider = %estimate.provider, city = %estimate.city, "Resolved coordinates");
        Ok(estimate)
    }

    /// Forward place search, at most five suggestions.
    pub async fn search_location(&self, query: &str) -> Result<Vec<PlaceSuggestion>, LocationError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Err(LocationError::InvalidQuery);
        }
        self.enrichment
            .search(query)
            .await
            .map_err(|e| LocationError::SearchFailed(e.to_string()))
    }

    /// Resolves a `place_id` from a [`PlaceSuggestion`] back into a full
    /// estimate. `source` is the suggestion's `source`; only that geocoder
    /// is asked.
    pub async fn resolve_place(
        &self,
        place_id: &str,
        source: &str,
    ) -> Result<LocationEstimate, LocationError> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(LocationError::InvalidPlaceId);
        }

        let estimate = self
            .enrichment
            .lookup(place_id, source)
            .await
            .map_err(|e| match e {
                GeocodeError::UnknownSource(source) => LocationError::UnknownPlaceSource(source),
                other => LocationError::PlaceLookupFailed(other.to_string()),
            })?;

        info!(provider = %estimate.provider, city = %estimate.city, "Resolved place");
        Ok(estimate)
    }

    /// Snapshot of per-provider counters.
    pub async fn provider_metrics(&self) -> HashMap<String, ProviderStats> {
        self.orchestrator.metrics.get_snapshot().await
    }
}
