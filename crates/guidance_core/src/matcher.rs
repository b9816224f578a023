//! crates/guidance_core/src/matcher.rs
//!
//! The longest-matched-keyword heuristic shared by the excerpt lookup and
//! the curated dua fallback.
//!
//! Substring containment is used deliberately instead of tokenized word
//! matching so multi-word keywords ("before eating") match without any
//! tokenization; longer keywords win because they are more specific.

use crate::domain::{DuaEntry, SurahExcerpt};

/// Anything that carries trigger keywords and can be scored against free
/// text.
pub trait KeywordMatch {
    fn keywords(&self) -> &[String];
}

impl KeywordMatch for DuaEntry {
    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl KeywordMatch for SurahExcerpt {
    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Returns the candidate whose longest keyword (by character count) occurs
/// as a literal substring of `text`, or `None` if no keyword of any
/// candidate matches.
///
/// Ties resolve to the first candidate in input order: only a strictly
/// higher score displaces the current best.
pub fn best_match<'a, T: KeywordMatch>(candidates: &'a [T], text: &str) -> Option<&'a T> {
    let text = text.to_lowercase();
    let mut best: Option<&T> = None;
    let mut best_score = 0usize;

    for candidate in candidates {
        let score = candidate
            .keywords()
            .iter()
            .filter(|k| !k.is_empty() && text.contains(k.to_lowercase().as_str()))
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DuaSource;

    fn entry(title: &str, keywords: &[&str]) -> DuaEntry {
        DuaEntry {
            title: title.to_string(),
            category: String::new(),
            arabic: "test".to_string(),
            transliteration: String::new(),
            translation: String::new(),
            meaning: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            source: DuaSource::Predefined,
        }
    }

    #[test]
    fn longer_keyword_wins() {
        let candidates = vec![entry("pain", &["pain"]), entry("headache", &["headache"])];
        let found = best_match(&candidates, "I have a headache and pain").unwrap();
        assert_eq!(found.title, "headache");
    }

    #[test]
    fn no_keyword_matches() {
        let candidates = vec![entry("pain", &["pain"]), entry("sleep", &["sleep", "bed"])];
        assert!(best_match(&candidates, "completely unrelated text").is_none());
    }

    #[test]
    fn tie_keeps_first_candidate() {
        let candidates = vec![entry("first", &["food"]), entry("second", &["meal"])];
        let found = best_match(&candidates, "food and meal").unwrap();
        assert_eq!(found.title, "first");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let candidates = vec![entry("travel", &["journey"])];
        assert!(best_match(&candidates, "My JOURNEY starts tomorrow").is_some());
    }

    #[test]
    fn multi_word_keywords_match_as_substrings() {
        let candidates = vec![
            entry("before", &["eat", "eating"]),
            entry("after", &["after eating"]),
        ];
        let found = best_match(&candidates, "what do I say after eating?").unwrap();
        assert_eq!(found.title, "after");
    }

    #[test]
    fn scores_only_the_longest_keyword_per_candidate() {
        // Two short matches do not add up to beat one long match.
        let candidates = vec![
            entry("many-short", &["eat", "food"]),
            entry("one-long", &["breakfast"]),
        ];
        let found = best_match(&candidates, "eat food for breakfast").unwrap();
        assert_eq!(found.title, "one-long");
    }
}
