// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConsensusError {
    #[error("no provider results to merge")]
    EmptyInput,
}
