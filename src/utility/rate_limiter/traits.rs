// 3rd party crates
use async_trait::async_trait;

/// Request quota guarding calls to a single upstream service.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Takes one token; returns false when the current window is spent.
    async fn acquire(&self) -> bool;
    /// Tokens left in the current window.
    fn remaining(&self) -> usize;
}
