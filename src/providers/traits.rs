use crate::error::GenerationError;
use async_trait::async_trait;

/// One completion call: the assembled prompt, the response token limit, and
/// the two stop sequences that keep the backend from speaking past its turn.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub stop: [String; 2],
}

/// The external text-generation capability.
///
/// Opaque to the core: one prompt in, one reply out, or a
/// [`GenerationError`]. No retry or backoff lives behind this trait — a
/// caller that wants reliability wraps the implementation it injects.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GenerationError>;
}
