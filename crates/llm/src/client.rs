use async_trait::async_trait;
use docroute_common::{AppConfig, DocRouteError, Result};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::backend::{LlmClient, TextEmbedder};
use crate::safety;
use crate::types::{
    EmbedRequest, EmbedResponse, GenerateOptions, GenerateRequest, GenerateResponse,
};

const MAX_RETRIES: u32 = 3;

/// Ollama API client
///
/// Serves both capabilities of the local backend: text generation and
/// embeddings. Model names are fixed at construction.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    llm_model: String,
    embedding_model: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(
        base_url: impl Into<String>,
        llm_model: impl Into<String>,
        embedding_model: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // 5 minutes for LLM calls
            .build()
            .map_err(|e| DocRouteError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama client initialized: {}", base_url);
        Ok(Self {
            base_url,
            llm_model: llm_model.into(),
            embedding_model: embedding_model.into(),
            client,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.ollama_base_url,
            &config.llm_model,
            &config.embedding_model,
        )
    }

    /// Generate text with retry on transient failures
    async fn generate_with_retry(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: self.llm_model.clone(),
            prompt: prompt.to_string(),
            stream: Some(false),
            options: Some(GenerateOptions {
                temperature: Some(0.3),
                top_p: Some(0.9),
                num_predict: None,
            }),
        };

        debug!(
            "Sending generate request - Model: {}, Prompt length: {}",
            request.model,
            request.prompt.len()
        );

        let mut last_error = None;

        for attempt in 1..=MAX_RETRIES {
            match self.try_generate(&url, &request).await {
                Ok(response) => {
                    debug!("Received response - Length: {}", response.len());
                    return Ok(response);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < MAX_RETRIES {
                        let delay = std::time::Duration::from_secs(2u64.pow(attempt - 1));
                        warn!(
                            "Ollama request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt,
                            MAX_RETRIES,
                            last_error.as_ref().unwrap(),
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| DocRouteError::llm("All generate attempts failed")))
    }

    /// Single attempt to generate text
    async fn try_generate(&self, url: &str, request: &GenerateRequest) -> Result<String> {
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocRouteError::network(format!("Failed to send request: {}", e)))?
            .error_for_status()
            .map_err(|e| DocRouteError::llm(format!("Ollama API error: {}", e)))?;

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DocRouteError::llm(format!("Failed to parse response: {}", e)))?;

        if result.response.is_empty() {
            return Err(DocRouteError::llm("Empty response from Ollama"));
        }

        Ok(result.response)
    }

    /// Generate embedding with retry on transient failures
    async fn embed_with_retry(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbedRequest {
            model: self.embedding_model.clone(),
            prompt: text.to_string(),
        };

        debug!(
            "Generating embedding - Model: {}, Text length: {}",
            request.model,
            request.prompt.len()
        );

        let mut last_error = None;

        for attempt in 1..=MAX_RETRIES {
            match self.try_embed(&url, &request).await {
                Ok(embedding) => {
                    debug!("Received embedding - Dimension: {}", embedding.len());
                    return Ok(embedding);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < MAX_RETRIES {
                        let delay = std::time::Duration::from_secs(2u64.pow(attempt - 1));
                        warn!(
                            "Embedding request failed (attempt {}/{}). Retrying in {:?}...",
                            attempt, MAX_RETRIES, delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| DocRouteError::embedding("All embedding attempts failed")))
    }

    /// Single attempt to generate an embedding
    async fn try_embed(&self, url: &str, request: &EmbedRequest) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DocRouteError::network(format!("Failed to send embedding request: {}", e))
            })?
            .error_for_status()
            .map_err(|e| DocRouteError::embedding(format!("Ollama embedding API error: {}", e)))?;

        let result: EmbedResponse = response.json().await.map_err(|e| {
            DocRouteError::embedding(format!("Failed to parse embedding response: {}", e))
        })?;

        if result.embedding.is_empty() {
            return Err(DocRouteError::embedding("Empty embedding from Ollama"));
        }

        Ok(result.embedding)
    }

    /// Test connection to Ollama
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DocRouteError::network(format!("Failed to connect to Ollama: {}", e)))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let response = self.generate_with_retry(prompt).await?;
        Ok(safety::screen(response))
    }
}

#[async_trait]
impl TextEmbedder for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_with_retry(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client =
            OllamaClient::new("http://localhost:11434", "llama3.2", "nomic-embed-text").unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.llm_model, "llama3.2");
        assert_eq!(client.embedding_model, "nomic-embed-text");
    }

    #[test]
    fn test_client_from_config() {
        let config = AppConfig::default();
        let client = OllamaClient::from_config(&config).unwrap();
        assert_eq!(client.embedding_model, config.embedding_model);
    }
}
