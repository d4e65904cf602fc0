// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("no geolocation provider produced a result")]
    AllProvidersFailed,

    #[error("provider queries were cancelled")]
    Cancelled,
}
