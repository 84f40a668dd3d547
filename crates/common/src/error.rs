/// DocRoute error types
#[derive(Debug, thiserror::Error)]
pub enum DocRouteError {
    /// Failed to read or parse a source file
    #[error("File load error: {0}")]
    FileLoad(String),

    /// Embedding backend failed or returned malformed output
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Index save/load failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Required backend credential is not configured
    #[error("Missing credential: {0}")]
    Credential(String),

    /// LLM related error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocRouteError {
    /// Create file load error
    pub fn file_load<S: Into<String>>(msg: S) -> Self {
        Self::FileLoad(msg.into())
    }

    /// Create embedding error
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create persistence error
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create credential error
    pub fn credential<S: Into<String>>(msg: S) -> Self {
        Self::Credential(msg.into())
    }

    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}
