// Completion gateway abstraction
//
// The dialogue loop only needs "messages in, text out". Anything that can
// answer a chat-completion request implements `CompletionGateway`.

use anyhow::Result;
use async_trait::async_trait;

pub mod openai;
pub mod types;

pub use openai::OpenAiGateway;
pub use types::{ChatMessage, ChatRole, CompletionRequest, ModelConfig};

/// Trait for chat-completion backends
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send a request and wait for the generated text
    ///
    /// Transport and service failures are returned as errors; callers do
    /// not retry.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Gateway name for logging
    fn name(&self) -> &str;
}
