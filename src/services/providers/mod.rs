//! AI provider abstraction and implementations.
//!
//! A trait-based seam over the text-generation backend so the analysis
//! pipeline can run against Gemini in production and a mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for text generation providers (e.g., Gemini).
///
/// One attempt per call: no retry or backoff happens at this seam, and
/// callers are expected to degrade gracefully on failure.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a free-form text response for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
