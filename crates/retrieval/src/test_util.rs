//! Deterministic embedding stubs for tests

use async_trait::async_trait;
use docroute_common::{DocRouteError, Result};
use docroute_llm::TextEmbedder;

pub(crate) const MOCK_DIMENSION: usize = 8;

/// Bag-of-bytes embedder: deterministic, fixed dimension, no network
pub(crate) struct MockEmbedder;

#[async_trait]
impl TextEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; MOCK_DIMENSION];
        for byte in text.bytes() {
            vector[byte as usize % MOCK_DIMENSION] += 1.0;
        }
        Ok(vector)
    }
}

/// Always fails, for error propagation tests
pub(crate) struct FailingEmbedder;

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(DocRouteError::embedding("embedder is down"))
    }
}
