//! Prompt templates for text tasks

/// Prompt for concise summarization
pub fn summarize_prompt(text: &str) -> String {
    format!("Summarize this text concisely:\n{}", text)
}

/// Prompt for sentiment classification
pub fn sentiment_prompt(text: &str) -> String {
    format!("Classify sentiment (positive/negative/neutral) for:\n{}", text)
}

/// Prompt for named entity extraction
pub fn entity_prompt(text: &str) -> String {
    format!(
        "Extract named entities (people, organizations, locations, dates) from this text. \
         Format the output as JSON with entity types as keys and lists of entities as values:\n{}",
        text
    )
}

/// Prompt for question answering, grounded in retrieved context when available
pub fn answer_prompt(question: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!(
            "Answer this question based on the provided context.\nQuestion: {}\nContext: {}",
            question, context
        ),
        None => format!("Answer this question concisely: {}", question),
    }
}

/// Prompt for code generation
pub fn code_generation_prompt(problem_statement: &str) -> String {
    format!(
        "Generate a code solution for the following problem:\n{}\n\n\
         Provide the solution with proper documentation and explanation.",
        problem_statement
    )
}

/// Prompt for code review
pub fn code_review_prompt(code: &str) -> String {
    format!(
        "Review the following code for potential issues, bugs, or improvements:\n```\n{}\n```\n\n\
         Provide specific feedback and suggestions for improvement.",
        code
    )
}
