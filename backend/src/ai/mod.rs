//! Text generation collaborators
//!
//! The plan service talks to a [`TextGenerator`]; the production
//! implementation is [`GeminiClient`].

use async_trait::async_trait;
use thiserror::Error;

mod gemini;

pub use gemini::GeminiClient;

/// Failures from the text generation collaborator
///
/// These never reach the API caller; the plan service substitutes the
/// local fallback plan instead.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response contained no text")]
    EmptyResponse,
}

/// A service that turns a prompt into free-form text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier, for logs
    fn model(&self) -> &str;
}
