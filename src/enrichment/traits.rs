// 3rd party crates
use async_trait::async_trait;

// Project imports
use crate::location::PlaceSuggestion;

// Current module imports
use super::errors::GeocodeError;
use super::types::{PlaceDetails, ReverseGeocode};

/// A geocoding service usable for reverse lookups and place search.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Address at a coordinate. Never moves the coordinate.
    async fn reverse(&self, lat: f64, lon: f64) -> Result<ReverseGeocode, GeocodeError>;

    /// Places matching free text, at most `limit`.
    async fn search(&self, query: &str, limit: usize)
        -> Result<Vec<PlaceSuggestion>, GeocodeError>;

    /// Coordinate and address of a place id this geocoder handed out in a
    /// search result.
    async fn lookup(&self, place_id: &str) -> Result<PlaceDetails, GeocodeError>;

    /// Label appended to the provider of enriched estimates.
    fn get_name(&self) -> &'static str;
}
