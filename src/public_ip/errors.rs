// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublicIpError {
    #[error("public IP could not be discovered from any service")]
    Undiscoverable,
}

/// Why a single service attempt was skipped; logged, never surfaced.
#[derive(Debug, Error)]
pub(crate) enum AttemptError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0} is not a public address")]
    NotPublic(std::net::IpAddr),
}
