//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock text provider that returns a canned reply or a forced failure, and
/// counts how often it was invoked so tests can assert the model was (not)
/// called.
pub struct MockTextProvider {
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockTextProvider {
    /// Provider that answers every prompt with the given text.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider that fails every call with the given API error message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the call counter, usable after the provider has been moved
    /// into the application.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }
}
