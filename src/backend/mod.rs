pub mod client;
pub mod extract;

pub use client::GenaiClient;

use crate::error::ApiError;
use async_trait::async_trait;

/// Seam over the external text-completion service, so the backend can be
/// swapped or mocked in tests.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ApiError>;
}
