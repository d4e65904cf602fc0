// Standard library
use std::time::Duration;

/// Discovers the machine's public address through a list of echo services.
#[derive(Debug, Clone)]
pub struct PublicIpResolver {
    pub client: reqwest::Client,
    pub services: Vec<String>,
    pub timeout: Duration,
}
