//! Address enrichment and place search.
//!
//! An [`EnrichmentChain`] holds an optional primary geocoder (Google, when a
//! key is configured) and a fallback (Nominatim). Reverse lookups attach
//! address fields to an estimate and nudge its scores; coordinates are never
//! moved.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod google;
pub mod impls;
pub mod nominatim;
pub mod traits;
pub mod types;

pub use errors::GeocodeError;
pub use google::GoogleGeocoder;
pub use nominatim::NominatimGeocoder;
pub use traits::Geocoder;
pub use functions::geocoder_for_source;
pub use types::{Address, EnrichmentChain, PlaceDetails, ReverseGeocode, Tier};
