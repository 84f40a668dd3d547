use async_trait::async_trait;
use docroute_common::{AppConfig, DocRouteError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::LlmClient;
use crate::safety;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// Hosted Gemini API client
///
/// Requires an API key; construction fails when none is configured.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.gemini_api_key.clone().ok_or_else(|| {
            DocRouteError::credential(
                "GEMINI_API_KEY environment variable not found. Please check your .env file.",
            )
        })?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| DocRouteError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Gemini client initialized: model={}", config.gemini_model);
        Ok(Self {
            api_key,
            model: config.gemini_model.clone(),
            client,
        })
    }

    async fn request_content(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model);

        debug!(
            "Sending generate request - Model: {}, Prompt length: {}",
            self.model,
            prompt.len()
        );

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocRouteError::network(format!("Failed to send request: {}", e)))?
            .error_for_status()
            .map_err(|e| DocRouteError::llm(format!("Gemini API error: {}", e)))?;

        let result: GeminiResponse = response
            .json()
            .await
            .map_err(|e| DocRouteError::llm(format!("Failed to parse response: {}", e)))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DocRouteError::llm("Empty response from Gemini"));
        }

        Ok(text)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let response = self.request_content(prompt).await?;
        Ok(safety::screen(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_fails() {
        let config = AppConfig::default();
        assert!(config.gemini_api_key.is_none());

        let err = GeminiClient::from_config(&config).unwrap_err();
        assert!(matches!(err, DocRouteError::Credential(_)));
    }

    #[test]
    fn test_client_with_api_key() {
        let mut config = AppConfig::default();
        config.gemini_api_key = Some("test-key".to_string());

        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.model, "gemini-1.5-pro");
    }
}
