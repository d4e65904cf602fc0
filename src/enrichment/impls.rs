// Standard library
use std::fmt;
use std::sync::Arc;

// 3rd party crates
use tracing::{debug, warn};

// Project imports
use crate::location::{validate_coordinates, LocationEstimate, PlaceSuggestion};

// Current module imports
use super::constants::{PLACE_PROVIDER, SEARCH_LIMIT};
use super::errors::GeocodeError;
use super::functions::{enriched, geocoder_for_source};
use super::traits::Geocoder;
use super::types::{EnrichmentChain, Tier};

impl fmt::Debug for EnrichmentChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichmentChain")
            .field("primary", &self.primary.as_ref().map(|g| g.get_name()))
            .field("fallback", &self.fallback.as_ref().map(|g| g.get_name()))
            .finish()
    }
}

impl EnrichmentChain {
    pub fn new(primary: Option<Arc<dyn Geocoder>>, fallback: Option<Arc<dyn Geocoder>>) -> Self {
        Self { primary, fallback }
    }

    fn links(&self) -> impl Iterator<Item = (Tier, &Arc<dyn Geocoder>)> {
        self.primary
            .iter()
            .map(|g| (Tier::Primary, g))
            .chain(self.fallback.iter().map(|g| (Tier::Fallback, g)))
    }

    /// Attaches address detail to `estimate`.
    ///
    /// An answer that leaves the estimate without any address field counts
    /// as no result and moves on to the next geocoder.
    /// Returns the last geocoder's error when every link fails, or
    /// `NotConfigured` when the chain is empty.
    pub async fn enrich(&self, estimate: &LocationEstimate) -> Result<LocationEstimate, GeocodeError> {
        let mut last_error = GeocodeError::NotConfigured("enrichment");
        for (tier, geocoder) in self.links() {
            match geocoder.reverse(estimate.lat, estimate.lon).await {
                Ok(geocode) => {
                    let out = enriched(estimate.clone(), &geocode, tier, geocoder.get_name());
                    if !out.has_address() {
                        warn!(geocoder = geocoder.get_name(), "Geocoder returned no address detail");
                        last_error = GeocodeError::NoResults(geocoder.get_name());
                        continue;
                    }
                    debug!(geocoder = geocoder.get_name(), "Attached address detail");
                    return Ok(out);
                }
                Err(e) => {
                    warn!(geocoder = geocoder.get_name(), error = %e, "Reverse geocoding failed");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    /// Resolves a place id from a search result back into an estimate,
    /// asking only the geocoder named by `source`. Scored like a
    /// caller-supplied coordinate.
    pub async fn lookup(
        &self,
        place_id: &str,
        source: &str,
    ) -> Result<LocationEstimate, GeocodeError> {
        let Some(name) = geocoder_for_source(source) else {
            return Err(GeocodeError::UnknownSource(source.to_string()));
        };
        let Some((tier, geocoder)) = self.links().find(|(_, g)| g.get_name() == name) else {
            return Err(GeocodeError::NotConfigured(name));
        };

        let details = geocoder.lookup(place_id).await?;
        if !validate_coordinates(details.lat, details.lon) {
            return Err(GeocodeError::Parse {
                geocoder: name,
                message: format!("coordinates out of range: {}, {}", details.lat, details.lon),
            });
        }

        let mut estimate = LocationEstimate::from_coordinates(details.lat, details.lon);
        estimate.provider = PLACE_PROVIDER.to_string();
        debug!(geocoder = name, place_id = %place_id, "Resolved place id");
        Ok(enriched(estimate, &details.geocode, tier, name))
    }

    /// Forward search through the chain, first non-empty answer wins.
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
        let mut last_error = GeocodeError::NotConfigured("search");
        for (_, geocoder) in self.links() {
            match geocoder.search(query, SEARCH_LIMIT).await {
                Ok(places) => return Ok(places),
                Err(e) => {
                    warn!(geocoder = geocoder.get_name(), error = %e, "Place search failed");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::types::{Address, PlaceDetails, ReverseGeocode};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeGeocoder {
        name: &'static str,
        city: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FakeGeocoder {
        fn ok(name: &'static str, city: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                city: Some(city),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                city: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn reverse(&self, _lat: f64, _lon: f64) -> Result<ReverseGeocode, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.city {
                Some(city) => Ok(ReverseGeocode {
                    address: Address {
                        city: city.to_string(),
                        ..Default::default()
                    },
                    precision: Some(0.99),
                }),
                None => Err(GeocodeError::HttpStatus {
                    geocoder: self.name,
                    status: 503,
                }),
            }
        }

        async fn search(
            &self,
            query: &str,
            _limit: usize,
        ) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.city {
                Some(city) => Ok(vec![PlaceSuggestion {
                    name: city.to_string(),
                    display_name: format!("{} ({})", city, query),
                    lat: 0.0,
                    lon: 0.0,
                    place_id: "1".to_string(),
                    source: self.name.to_string(),
                }]),
                None => Err(GeocodeError::NoResults(self.name)),
            }
        }

        async fn lookup(&self, place_id: &str) -> Result<PlaceDetails, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.city {
                Some(city) => Ok(PlaceDetails {
                    lat: 45.76,
                    lon: 4.84,
                    geocode: ReverseGeocode {
                        address: Address {
                            city: city.to_string(),
                            formatted_address: format!("{} ({})", city, place_id),
                            ..Default::default()
                        },
                        precision: Some(0.95),
                    },
                }),
                None => Err(GeocodeError::NoResults(self.name)),
            }
        }

        fn get_name(&self) -> &'static str {
            self.name
        }
    }

    fn ip_estimate() -> LocationEstimate {
        LocationEstimate {
            lat: 48.85,
            lon: 2.35,
            accuracy: 0.6,
            confidence: 0.7,
            provider: "consensus-2".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn primary_answers_first() {
        let primary = FakeGeocoder::ok("google_maps", "Paris");
        let fallback = FakeGeocoder::ok("nominatim", "Lutetia");
        let chain = EnrichmentChain::new(Some(primary.clone()), Some(fallback.clone()));

        let out = chain.enrich(&ip_estimate()).await.unwrap();
        assert_eq!(out.city, "Paris");
        assert_eq!(out.provider, "consensus-2+google_maps");
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_back_when_primary_fails() {
        let chain = EnrichmentChain::new(
            Some(FakeGeocoder::failing("google_maps")),
            Some(FakeGeocoder::ok("nominatim", "Paris")),
        );
        let out = chain.enrich(&ip_estimate()).await.unwrap();
        assert_eq!(out.provider, "consensus-2+nominatim");
        assert!((out.accuracy - 0.65).abs() < 1e-9);
        assert_eq!(out.confidence, 0.7);
    }

    #[tokio::test]
    async fn missing_primary_goes_straight_to_fallback() {
        let chain = EnrichmentChain::new(None, Some(FakeGeocoder::ok("nominatim", "Paris")));
        let out = chain.enrich(&ip_estimate()).await.unwrap();
        assert_eq!(out.city, "Paris");
    }

    #[tokio::test]
    async fn blank_answer_moves_to_fallback() {
        let primary = FakeGeocoder::ok("google_maps", "");
        let fallback = FakeGeocoder::ok("nominatim", "Paris");
        let chain = EnrichmentChain::new(Some(primary.clone()), Some(fallback.clone()));

        let out = chain
            .enrich(&LocationEstimate::from_coordinates(48.85, 2.35))
            .await
            .unwrap();
        assert_eq!(out.provider, "gps+nominatim");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);

        let blank_only = EnrichmentChain::new(None, Some(FakeGeocoder::ok("nominatim", "")));
        assert!(matches!(
            blank_only.enrich(&LocationEstimate::from_coordinates(48.85, 2.35)).await,
            Err(GeocodeError::NoResults("nominatim"))
        ));
    }

    #[tokio::test]
    async fn both_failing_reports_last_error() {
        let chain = EnrichmentChain::new(
            Some(FakeGeocoder::failing("google_maps")),
            Some(FakeGeocoder::failing("nominatim")),
        );
        let err = chain.enrich(&ip_estimate()).await.unwrap_err();
        assert!(err.to_string().starts_with("nominatim"));

        let empty = EnrichmentChain::new(None, None);
        assert!(matches!(
            empty.enrich(&ip_estimate()).await,
            Err(GeocodeError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn lookup_asks_only_the_named_source() {
        let primary = FakeGeocoder::ok("google_maps", "Lyon");
        let fallback = FakeGeocoder::ok("nominatim", "Lugdunum");
        let chain = EnrichmentChain::new(Some(primary.clone()), Some(fallback.clone()));

        let place = chain.lookup("ChIJl4foalHq9EcR8CG75CqrCAQ", "google_places").await.unwrap();
        assert_eq!(place.provider, "place+google_maps");
        assert_eq!(place.source_type, crate::location::SourceType::Gps);
        assert_eq!((place.lat, place.lon), (45.76, 4.84));
        assert_eq!(place.accuracy, 0.95);
        assert_eq!(place.confidence, 0.99);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);

        let place = chain.lookup("123", "nominatim").await.unwrap();
        assert_eq!(place.city, "Lugdunum");
        assert_eq!(place.accuracy, 0.90);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lookup_rejects_unknown_or_unconfigured_sources() {
        let chain = EnrichmentChain::new(None, Some(FakeGeocoder::ok("nominatim", "Lyon")));
        assert!(matches!(
            chain.lookup("1", "bing").await,
            Err(GeocodeError::UnknownSource(source)) if source == "bing"
        ));
        assert!(matches!(
            chain.lookup("1", "google_places").await,
            Err(GeocodeError::NotConfigured("google_maps"))
        ));
    }

    #[tokio::test]
    async fn search_falls_back() {
        let chain = EnrichmentChain::new(
            Some(FakeGeocoder::failing("google_maps")),
            Some(FakeGeocoder::ok("nominatim", "Lyon")),
        );
        let places = chain.search("Lyon").await.unwrap();
        assert_eq!(places[0].source, "nominatim");
    }
}
