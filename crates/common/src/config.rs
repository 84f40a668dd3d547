use crate::error::DocRouteError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// DocRoute application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data base path
    pub data_dir: PathBuf,

    /// Index file path
    pub index_path: PathBuf,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Text generation model name
    pub llm_model: String,

    /// Gemini API key (hosted backend, optional)
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    pub gemini_model: String,

    /// Chunk size in bytes for text splitting
    pub chunk_size: usize,

    /// Overlap in bytes between consecutive chunks
    pub chunk_overlap: usize,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            index_path: PathBuf::from("./data/index.json"),
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            llm_model: "llama3.2:latest".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-1.5-pro".to_string(),
            chunk_size: 1000,
            chunk_overlap: 100,
            log_dir: PathBuf::from("./data/log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, DocRouteError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            data_dir: Self::get_env_path("DATA_DIR").unwrap_or(defaults.data_dir),
            index_path: Self::get_env_path("INDEX_PATH").unwrap_or(defaults.index_path),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chunk_size),
            chunk_overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chunk_overlap),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), DocRouteError> {
        for dir in [&self.data_dir, &self.log_dir] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DocRouteError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DocRouteError> {
        if self.embedding_model.is_empty() {
            return Err(DocRouteError::config("Embedding model name cannot be empty"));
        }

        if self.llm_model.is_empty() {
            return Err(DocRouteError::config("LLM model name cannot be empty"));
        }

        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://")
        {
            return Err(DocRouteError::config(
                "Ollama base URL must start with http:// or https://",
            ));
        }

        if self.chunk_size == 0 {
            return Err(DocRouteError::config("Chunk size cannot be 0"));
        }

        // The chunker cannot make forward progress otherwise
        if self.chunk_overlap >= self.chunk_size {
            return Err(DocRouteError::config(
                "Chunk overlap must be smaller than chunk size",
            ));
        }

        Ok(())
    }
}
