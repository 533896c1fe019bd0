//! Static/dynamic classification rules and the companion entity-predicate
//! extractor that feeds `MemoryNode::entities`.
//!
//! A memory is static if any of: its content matches one of a fixed set of
//! declarative patterns about the user, its importance is at or above the
//! configured threshold, or one of its extracted entities carries a
//! predicate in the mutually-exclusive set `{name, age, location,
//! employer, favorite_<X>}`.

use recall_core::config::ClassifierConfig;
use recall_core::memory::Importance;

const DECLARATIVE_PATTERNS: &[&str] = &[
    "my name is",
    "i live in",
    "i work at",
    "my favorite",
    "i am a",
    "i am an",
];

/// Whether a memory should be classified static, given its content,
/// importance, and already-extracted entities.
pub fn classify(content: &str, importance: Importance, entities: &[String], config: &ClassifierConfig) -> bool {
    if importance.value() >= config.static_importance_threshold {
        return true;
    }
    if matches_declarative_pattern(content) {
        return true;
    }
    entities.iter().any(|e| is_static_predicate(e))
}

fn matches_declarative_pattern(content: &str) -> bool {
    let lower = content.to_lowercase();
    DECLARATIVE_PATTERNS.iter().any(|p| lower.contains(p))
}

fn is_static_predicate(entity: &str) -> bool {
    let predicate = entity.split(':').next().unwrap_or("");
    matches!(predicate, "name" | "age" | "location" | "employer") || predicate.starts_with("favorite_")
}

/// Extract `"subject:value"` entity strings from content, recognizing the
/// same declarative patterns `classify` checks for static-ness. Best-effort:
/// content that doesn't match any known pattern yields no entities.
pub fn extract_entity_predicates(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    let mut out = Vec::new();

    if let Some(value) = extract_after(&lower, content, "my name is") {
        out.push(format!("name:{value}"));
    }
    if let Some(value) = extract_after(&lower, content, "i live in") {
        out.push(format!("location:{value}"));
    }
    if let Some(value) = extract_after(&lower, content, "i work at") {
        out.push(format!("employer:{value}"));
    }
    if let Some((topic, value)) = extract_favorite(&lower, content) {
        out.push(format!("favorite_{topic}:{value}"));
    }
    if let Some(age) = extract_age(&lower) {
        out.push(format!("age:{age}"));
    }
    out
}

fn first_clause(s: &str) -> &str {
    s.split(['.', ',', '!']).next().unwrap_or(s).trim()
}

fn extract_after(lower: &str, original: &str, prefix: &str) -> Option<String> {
    let idx = lower.find(prefix)?;
    let start = idx + prefix.len();
    let value = first_clause(original.get(start..)?.trim());
    (!value.is_empty()).then(|| value.to_string())
}

fn extract_favorite(lower: &str, original: &str) -> Option<(String, String)> {
    let prefix = "my favorite ";
    let idx = lower.find(prefix)?;
    let after = &lower[idx + prefix.len()..];
    let is_idx = after.find(" is ")?;
    let topic = after[..is_idx].trim();
    let value_start = idx + prefix.len() + is_idx + " is ".len();
    let value = first_clause(original.get(value_start..)?.trim());
    if topic.is_empty() || value.is_empty() {
        return None;
    }
    Some((topic.replace(' ', "_"), value.to_string()))
}

fn extract_age(lower: &str) -> Option<String> {
    let idx = lower.find("i am ")?;
    let after = &lower[idx + "i am ".len()..];
    let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let rest = after[digits.len()..].trim_start();
    (rest.starts_with("years old") || rest.starts_with("year old")).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    #[test]
    fn declarative_pattern_is_static() {
        assert!(classify("My name is Alice", Importance::new(0.2), &[], &cfg()));
    }

    #[test]
    fn high_importance_is_static_regardless_of_content() {
        assert!(classify("random note", Importance::new(0.95), &[], &cfg()));
    }

    #[test]
    fn entity_predicate_is_static() {
        assert!(classify("unrelated phrasing", Importance::new(0.1), &["location:Seattle".to_string()], &cfg()));
    }

    #[test]
    fn episodic_content_is_dynamic() {
        assert!(!classify("I'm working on the Q3 report today", Importance::new(0.4), &[], &cfg()));
    }

    #[test]
    fn extracts_name() {
        let entities = extract_entity_predicates("My name is Alice Smith.");
        assert_eq!(entities, vec!["name:Alice Smith".to_string()]);
    }

    #[test]
    fn extracts_employer() {
        let entities = extract_entity_predicates("I work at Google");
        assert_eq!(entities, vec!["employer:Google".to_string()]);
    }

    #[test]
    fn extracts_favorite() {
        let entities = extract_entity_predicates("My favorite color is blue");
        assert_eq!(entities, vec!["favorite_color:blue".to_string()]);
    }

    #[test]
    fn extracts_age() {
        let entities = extract_entity_predicates("I am 29 years old");
        assert_eq!(entities, vec!["age:29".to_string()]);
    }

    #[test]
    fn unmatched_content_yields_no_entities() {
        assert!(extract_entity_predicates("Nothing declarative here").is_empty());
    }
}
