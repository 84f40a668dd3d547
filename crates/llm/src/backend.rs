use async_trait::async_trait;
use docroute_common::Result;

/// Maps text to a fixed-length vector.
///
/// Implementations must be deterministic for identical input within one
/// process lifetime, and must keep the dimension constant once chosen.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embed a text string
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Common trait for generative text backends
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}
