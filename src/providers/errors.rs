// 3rd party crates
use thiserror::Error;

/// Failure of a single provider lookup.
///
/// Always recovered by the orchestrator: the provider is logged and left
/// out of the consensus.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider}: network error: {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: HTTP {status}")]
    HttpStatus { provider: String, status: u16 },

    #[error("{0}: rate limited by upstream")]
    RateLimited(String),

    #[error("{0}: local request quota exhausted")]
    QuotaExhausted(String),

    #[error("{provider}: unexpected content type '{content_type}'")]
    UnexpectedContentType {
        provider: String,
        content_type: String,
    },

    #[error("{provider}: {message}")]
    Api { provider: String, message: String },

    #[error("{provider}: response is missing required field '{field}'")]
    MissingField {
        provider: String,
        field: &'static str,
    },

    #[error("{provider}: malformed response: {message}")]
    Parse { provider: String, message: String },

    #[error("{provider}: no answer within {secs} seconds")]
    Timeout { provider: String, secs: u64 },
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::QuotaExhausted(_))
    }
}
