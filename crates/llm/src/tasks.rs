use docroute_common::Result;
use std::sync::Arc;
use tracing::debug;

use crate::backend::LlmClient;
use crate::prompts;

/// Prompt-composition layer over a generative backend.
///
/// Question answering takes the context as an argument so the retrieval
/// lookup stays with the caller.
pub struct TaskRunner {
    client: Arc<dyn LlmClient>,
}

impl TaskRunner {
    /// Create new task runner
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Summarize text concisely
    pub async fn summarize(&self, text: &str) -> Result<String> {
        debug!("Summarizing text - Length: {} chars", text.len());
        self.client.generate(&prompts::summarize_prompt(text)).await
    }

    /// Classify sentiment as positive/negative/neutral
    pub async fn sentiment(&self, text: &str) -> Result<String> {
        self.client.generate(&prompts::sentiment_prompt(text)).await
    }

    /// Extract named entities as JSON
    pub async fn extract_entities(&self, text: &str) -> Result<String> {
        self.client.generate(&prompts::entity_prompt(text)).await
    }

    /// Answer a question, grounding in the provided context when present
    pub async fn answer(&self, question: &str, context: Option<&str>) -> Result<String> {
        debug!(
            "Answering question - With context: {}",
            context.is_some()
        );
        self.client
            .generate(&prompts::answer_prompt(question, context))
            .await
    }

    /// Generate code for a problem statement
    pub async fn generate_code(&self, problem_statement: &str) -> Result<String> {
        self.client
            .generate(&prompts::code_generation_prompt(problem_statement))
            .await
    }

    /// Review code for issues and improvements
    pub async fn review_code(&self, code: &str) -> Result<String> {
        self.client
            .generate(&prompts::code_review_prompt(code))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the prompt back, recording it for assertions
    struct EchoLlm {
        prompts: Mutex<Vec<String>>,
    }

    impl EchoLlm {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for EchoLlm {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("echo: {}", prompt))
        }
    }

    #[tokio::test]
    async fn test_summarize_composes_prompt() {
        let llm = EchoLlm::new();
        let tasks = TaskRunner::new(llm.clone());

        let result = tasks.summarize("A long document.").await.unwrap();
        assert!(result.starts_with("echo:"));
        assert!(llm.last_prompt().starts_with("Summarize this text concisely:"));
    }

    #[tokio::test]
    async fn test_answer_includes_context() {
        let llm = EchoLlm::new();
        let tasks = TaskRunner::new(llm.clone());

        tasks
            .answer("Who wrote it?", Some("The report was written by Kim."))
            .await
            .unwrap();
        let prompt = llm.last_prompt();
        assert!(prompt.contains("Question: Who wrote it?"));
        assert!(prompt.contains("The report was written by Kim."));
    }

    #[tokio::test]
    async fn test_answer_without_context() {
        let llm = EchoLlm::new();
        let tasks = TaskRunner::new(llm.clone());

        tasks.answer("What year is it?", None).await.unwrap();
        assert!(llm.last_prompt().starts_with("Answer this question concisely:"));
    }
}
