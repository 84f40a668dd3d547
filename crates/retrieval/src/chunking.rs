//! Overlapping text chunking with breakpoint heuristics

/// Default chunk size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap in bytes between consecutive chunks
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Text chunk
#[derive(Debug, Clone)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// Start offset in original text
    pub start: usize,

    /// End offset in original text
    pub end: usize,
}

/// Split text into overlapping chunks.
///
/// Window ends snap backward to a paragraph break, then a sentence break,
/// when one falls in the second half of the window. Offsets are byte
/// offsets clamped to character boundaries. The start offset strictly
/// increases each iteration, and overlap is clamped below the chunk size,
/// so the loop terminates for any input.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<TextChunk> {
    let len = text.len();
    let chunk_size = chunk_size.max(1);

    if len <= chunk_size {
        return vec![TextChunk {
            text: text.to_string(),
            start: 0,
            end: len,
        }];
    }

    let overlap = overlap.min(chunk_size - 1);

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < len {
        let mut end = floor_char_boundary(text, (start + chunk_size).min(len));

        // Try to find a good breakpoint
        if end < len {
            let half = start + chunk_size / 2;
            let window = &text[start..end];

            if let Some(pos) = window.rfind("\n\n").map(|p| start + p).filter(|&p| p > half) {
                // Paragraph break
                end = pos;
            } else if let Some(pos) = window.rfind(". ").map(|p| start + p).filter(|&p| p > half) {
                // Sentence break, keep the period
                end = pos + 1;
            }
        }

        if end <= start {
            // Window shorter than one character, take the next code point
            end = ceil_char_boundary(text, start + 1);
        }

        chunks.push(TextChunk {
            text: text[start..end].to_string(),
            start,
            end,
        });

        if end >= len {
            break;
        }

        let mut next = ceil_char_boundary(text, end.saturating_sub(overlap));
        if next <= start {
            next = end;
        }
        start = next;
    }

    chunks
}

/// Largest character boundary not past `index`
fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest character boundary at or past `index`
fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index.min(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = "This is a short text.";
        let chunks = chunk_text(text, 100, 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, text.len());
    }

    #[test]
    fn test_exact_fit_is_single_chunk() {
        let text = "abcdef";
        let chunks = chunk_text(text, text.len(), 2);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_chunks_cover_text_without_gaps() {
        let text = "word ".repeat(500);
        let chunks = chunk_text(&text, 100, 20);

        assert!(chunks.len() > 1);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks.last().unwrap().end, text.len());
        for pair in chunks.windows(2) {
            // The next chunk starts inside or exactly at the previous end
            assert!(pair[1].start <= pair[0].end);
            assert!(pair[1].start > pair[0].start);
        }
    }

    #[test]
    fn test_snaps_to_paragraph_break() {
        let mut text = "a".repeat(80);
        text.push_str("\n\n");
        text.push_str(&"b".repeat(80));
        let chunks = chunk_text(&text, 100, 10);

        // First window ends at the paragraph break, not mid-word
        assert_eq!(chunks[0].end, 80);
        assert!(chunks[0].text.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_snaps_to_sentence_break() {
        let mut text = "a".repeat(78);
        text.push_str(". ");
        text.push_str(&"b".repeat(80));
        let chunks = chunk_text(&text, 100, 10);

        // Ends one past the period
        assert_eq!(chunks[0].end, 79);
        assert!(chunks[0].text.ends_with('.'));
    }

    #[test]
    fn test_ignores_breakpoint_in_first_half() {
        let mut text = "a".repeat(10);
        text.push_str("\n\n");
        text.push_str(&"b".repeat(200));
        let chunks = chunk_text(&text, 100, 10);

        // Break at offset 10 is before the window midpoint, raw cut instead
        assert_eq!(chunks[0].end, 100);
    }

    #[test]
    fn test_overlap_carries_text_between_chunks() {
        let text = "x".repeat(250);
        let chunks = chunk_text(&text, 100, 20);

        for pair in chunks.windows(2) {
            assert_eq!(pair[1].start, pair[0].end - 20);
        }
    }

    #[test]
    fn test_oversized_overlap_still_terminates() {
        let text = "y".repeat(300);
        // overlap >= chunk_size would stall the scan without the clamp
        let chunks = chunk_text(&text, 50, 50);

        assert!(!chunks.is_empty());
        assert_eq!(chunks.last().unwrap().end, text.len());
        for pair in chunks.windows(2) {
            assert!(pair[1].start > pair[0].start);
        }
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "역".repeat(100); // 3 bytes per char
        let chunks = chunk_text(&text, 100, 10);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(text.is_char_boundary(chunk.start));
            assert!(text.is_char_boundary(chunk.end));
        }
        assert_eq!(chunks.last().unwrap().end, text.len());
    }

    #[test]
    fn test_empty_text_is_single_empty_chunk() {
        let chunks = chunk_text("", 100, 10);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
    }
}
