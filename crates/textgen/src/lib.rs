//! Client for a hosted text-generation endpoint.
//!
//! The dashboard only needs "send one prompt, get one reply", so the
//! [`TextGenerator`] trait is the seam the API depends on and
//! [`TextGenApi`] is the production implementation speaking the
//! OpenAI-compatible `chat/completions` protocol.

pub mod api;
pub mod config;

pub use api::{TextGenApi, TextGenError};
pub use config::{TextGenConfig, TextGenConfigError};

/// One-shot prompt completion. No conversation state is kept between calls.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` as a single user message and return the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, TextGenError>;
}

#[async_trait::async_trait]
impl TextGenerator for TextGenApi {
    async fn complete(&self, prompt: &str) -> Result<String, TextGenError> {
        self.chat(prompt).await
    }
}
