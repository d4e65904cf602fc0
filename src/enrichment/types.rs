// Standard library
use std::sync::Arc;

// Current module imports
use super::traits::Geocoder;

/// Structured address returned by a reverse lookup. Empty when unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub house_number: String,
    pub road: String,
    pub neighborhood: String,
    pub suburb: String,
    pub city: String,
    pub postal_town: String,
    pub district: String,
    pub state: String,
    pub country: String,
    pub country_code: String,
    pub postal_code: String,
    pub formatted_address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocode {
    pub address: Address,
    /// Geocoder-reported positional precision, when it has one.
    pub precision: Option<f64>,
}

/// A place resolved from a geocoder's own identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub lat: f64,
    pub lon: f64,
    pub geocode: ReverseGeocode,
}

/// Which link of the chain produced the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Fallback,
}

/// Primary and fallback geocoders, tried in that order.
#[derive(Clone)]
pub struct EnrichmentChain {
    pub primary: Option<Arc<dyn Geocoder>>,
    pub fallback: Option<Arc<dyn Geocoder>>,
}
