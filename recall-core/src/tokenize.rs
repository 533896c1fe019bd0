use std::collections::HashSet;

/// Stop words dropped from sparse/keyword scoring and relationship
/// keyword-overlap checks.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see", "two",
    "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "with", "that",
    "this", "have", "from", "they", "will", "what", "about", "into",
];

/// Lowercase, strip non-alphanumeric characters, split on whitespace, and
/// drop tokens shorter than `min_keep_len` or in the stop-word list.
///
/// Shared by the relationship detector's keyword-overlap check and the
/// retrieval engine's sparse scorer, so both see identical tokens.
pub fn tokenize(text: &str, min_keep_len: usize) -> Vec<String> {
    let stop: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    text.to_lowercase()
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|token| token.len() >= min_keep_len && !stop.contains(token.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        let tokens = tokenize("Hello, World! Working on Rust.", 3);
        assert!(tokens.contains(&"hello".to_string()));
        assert!(tokens.contains(&"world".to_string()));
        assert!(tokens.contains(&"working".to_string()));
        assert!(tokens.contains(&"rust".to_string()));
    }

    #[test]
    fn drops_short_and_stop_words() {
        let tokens = tokenize("I am a cat and the dog", 3);
        assert!(!tokens.contains(&"and".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"am".to_string()));
        assert!(tokens.contains(&"cat".to_string()));
    }
}
