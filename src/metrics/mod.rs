pub mod types;

pub use types::{ProviderMetrics, ProviderStats};
