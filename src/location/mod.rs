//! Location data model.
//!
//! `LocationEstimate` is the value every stage of the pipeline produces and
//! consumes: provider adapters emit one per upstream answer, the consensus
//! step merges them, the enrichment chain fills in address detail and the
//! session cache stores the final record.

pub mod constants;
pub mod errors;
pub mod functions;
pub mod impls;
pub mod types;

pub use errors::FieldMapError;
pub use functions::{format_address, validate_coordinates};
pub use types::{LocationEstimate, PlaceSuggestion, SourceType};
