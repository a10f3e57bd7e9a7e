//! Keyword extraction for lexical matching

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

/// Articles, conjunctions and common prepositions ignored during matching
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "for", "of", "in", "on", "at",
    "to", "by", "with", "from", "into", "onto", "upon", "about", "above", "below", "after",
    "before", "between", "through", "during", "without", "within", "under", "over", "across",
    "against", "along", "among", "around", "behind", "beyond", "toward", "towards", "unless",
    "until", "while", "whereas", "although", "though", "because", "since", "either", "neither",
    "both", "whether", "than", "then", "that", "this", "these", "those",
];

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("static punctuation pattern"));

/// Normalize free text into its significant keywords
///
/// Lower-cases, strips punctuation, splits on whitespace and drops tokens of
/// three characters or fewer and stop words. Order of first occurrence is
/// kept so downstream output stays deterministic.
pub fn extract_keywords(text: &str) -> IndexSet<String> {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");

    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() > 3)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_no_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t").is_empty());
    }

    #[test]
    fn test_short_tokens_and_stop_words_removed() {
        let keywords = extract_keywords("The system shall log audit access through the portal");
        let keywords: Vec<_> = keywords.iter().map(String::as_str).collect();
        assert_eq!(keywords, vec!["system", "shall", "audit", "access", "portal"]);
    }

    #[test]
    fn test_punctuation_stripped_and_deduplicated() {
        let keywords = extract_keywords("Encrypt PHI; encrypt PHI-at-rest, (encrypt)!");
        let keywords: Vec<_> = keywords.iter().map(String::as_str).collect();
        assert_eq!(keywords, vec!["encrypt", "phiatrest"]);
    }

    #[test]
    fn test_case_folded() {
        let keywords = extract_keywords("PATIENT Patient patient");
        assert_eq!(keywords.len(), 1);
        assert!(keywords.contains("patient"));
    }
}
