//! DocRoute LLM Integration
//!
//! Backend traits, Ollama and Gemini clients, content safety screening,
//! prompt templates and the text task runner.

mod backend;
mod client;
mod gemini;
mod prompts;
mod safety;
mod tasks;
mod types;

pub use backend::{LlmClient, TextEmbedder};
pub use client::OllamaClient;
pub use gemini::GeminiClient;
pub use prompts::{
    answer_prompt, code_generation_prompt, code_review_prompt, entity_prompt, sentiment_prompt,
    summarize_prompt,
};
pub use safety::{is_safe, screen, FILTERED_MESSAGE};
pub use tasks::TaskRunner;
pub use types::{EmbedRequest, EmbedResponse, GenerateOptions, GenerateRequest, GenerateResponse};
