// 3rd party crates
use thiserror::Error;

/// Failure of a single geocoder call.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("{geocoder}: network error: {source}")]
    Network {
        geocoder: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{geocoder}: HTTP {status}")]
    HttpStatus { geocoder: &'static str, status: u16 },

    #[error("{geocoder}: status {status}")]
    Status {
        geocoder: &'static str,
        status: String,
    },

    #[error("{0}: no results")]
    NoResults(&'static str),

    #[error("{geocoder}: malformed response: {message}")]
    Parse {
        geocoder: &'static str,
        message: String,
    },

    #[error("{0}: not configured")]
    NotConfigured(&'static str),

    #[error("unknown place source '{0}'")]
    UnknownSource(String),
}
