//! Content safety screening for generated text

/// Substituted for any response that trips the keyword screen
pub const FILTERED_MESSAGE: &str = "Response filtered due to content policy.";

/// Keywords that cause a response to be withheld
const BANNED_KEYWORDS: &[&str] = &["harmful", "biased", "hate speech"];

/// Check whether a generated response passes the keyword screen
pub fn is_safe(response: &str) -> bool {
    let lowered = response.to_lowercase();
    !BANNED_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Replace disallowed output with the fixed policy message.
///
/// A policy substitution, not an error: callers always get a string back.
pub fn screen(response: String) -> String {
    if is_safe(&response) {
        response
    } else {
        FILTERED_MESSAGE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_response_passes_through() {
        let text = "The capital of France is Paris.".to_string();
        assert_eq!(screen(text.clone()), text);
    }

    #[test]
    fn test_banned_keyword_is_filtered() {
        let text = "This content could be Harmful to readers.".to_string();
        assert_eq!(screen(text), FILTERED_MESSAGE);
    }

    #[test]
    fn test_screen_is_case_insensitive() {
        assert!(!is_safe("HATE SPEECH is not allowed"));
        assert!(is_safe("hats and speeches"));
    }
}
