// 3rd party crates
use thiserror::Error;

/// Errors raised while rebuilding an estimate from its flat field map.
#[derive(Debug, Error)]
pub enum FieldMapError {
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid value for '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}
