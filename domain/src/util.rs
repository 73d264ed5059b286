//! Shared text helpers.

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Whether `phrase` occurs in `haystack` starting on a word boundary.
///
/// Both arguments are expected to be lowercase. Only the start of the match
/// is anchored, so `"issue"` matches `"issues"` but `"add"` does not match
/// `"padding"`.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(start, _)| {
        haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Returns the first phrase from `phrases` that occurs in `haystack`.
pub fn first_phrase<'a>(haystack: &str, phrases: &[&'a str]) -> Option<&'a str> {
    phrases
        .iter()
        .copied()
        .find(|phrase| contains_phrase(haystack, phrase))
}

/// Split text into trimmed, non-empty sentences.
///
/// Terminators (`.`, `!`, `?`) stay attached to their sentence; newlines
/// also end a sentence so transcript lines stay separate.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '\n') {
            let end = if c == '\n' { index } else { index + c.len_utf8() };
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                result.push(sentence);
            }
            start = index + c.len_utf8();
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        result.push(tail);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        let s = "あのね"; // 3 bytes per char
        assert_eq!(truncate_str(s, 4), "あ");
        assert_eq!(truncate_str(s, 6), "あの");
    }

    #[test]
    fn phrase_anchored_at_word_start() {
        assert!(contains_phrase("open issues remain", "issue"));
        assert!(contains_phrase("can we add sso", "can we"));
        assert!(!contains_phrase("padding the estimate", "add"));
        assert!(contains_phrase("add it", "add"));
    }

    #[test]
    fn first_phrase_respects_order() {
        let phrases = ["status", "update"];
        assert_eq!(first_phrase("any update on status?", &phrases), Some("status"));
        assert_eq!(first_phrase("nothing here", &phrases), None);
    }

    #[test]
    fn sentences_split_on_terminators_and_newlines() {
        let text = "Alex will fix the bug by Friday. Can we ship?\nSam: sounds good";
        assert_eq!(
            sentences(text),
            vec![
                "Alex will fix the bug by Friday.",
                "Can we ship?",
                "Sam: sounds good"
            ]
        );
    }

    #[test]
    fn sentences_empty_input() {
        assert!(sentences("  \n ").is_empty());
    }
}
