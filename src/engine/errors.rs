// 3rd party crates
use thiserror::Error;

// Project imports
use crate::consensus::ConsensusError;
use crate::orchestrator::OrchestratorError;
use crate::public_ip::PublicIpError;

/// Errors surfaced to callers of [`LocationEngine`](super::LocationEngine).
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("all geolocation providers failed")]
    AllProvidersFailed,

    #[error("invalid coordinates: latitude {lat}, longitude {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("public IP address could not be discovered")]
    PublicIpUndiscoverable,

    #[error("address enrichment failed: {0}")]
    EnrichmentFailed(String),

    #[error("location resolution was cancelled")]
    Cancelled,

    #[error("location resolution exceeded its {0} second deadline")]
    DeadlineExceeded(u64),

    #[error("place search failed: {0}")]
    SearchFailed(String),

    #[error("search query must contain at least two characters")]
    InvalidQuery,

    #[error("place id must not be empty")]
    InvalidPlaceId,

    #[error("unknown place source '{0}'")]
    UnknownPlaceSource(String),

    #[error("place lookup failed: {0}")]
    PlaceLookupFailed(String),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl From<OrchestratorError> for LocationError {
    fn from(error: OrchestratorError) -> Self {
        match error {
            OrchestratorError::AllProvidersFailed => LocationError::AllProvidersFailed,
            OrchestratorError::Cancelled => LocationError::Cancelled,
        }
    }
}

impl From<PublicIpError> for LocationError {
    fn from(error: PublicIpError) -> Self {
        match error {
            PublicIpError::Undiscoverable => LocationError::PublicIpUndiscoverable,
        }
    }
}
