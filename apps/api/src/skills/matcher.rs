//! Skill Matchers — pluggable strategies that find vocabulary entries in resume text.
//!
//! `DictionaryMatcher` is always present. `PhraseMatcher` exists only when the phrase
//! engine loaded, and `SkillExtractor` holds it as an `Option`.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::skills::phrases::PhraseEngine;
use crate::skills::vocabulary::SkillVocabulary;

/// Result of running one matcher over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Vocabulary entries found (possibly none).
    Matched(BTreeSet<String>),
    /// The strategy could not run for this text. Contributes nothing.
    Unavailable,
}

impl MatchOutcome {
    pub fn into_skills(self) -> BTreeSet<String> {
        match self {
            MatchOutcome::Matched(skills) => skills,
            MatchOutcome::Unavailable => BTreeSet::new(),
        }
    }
}

/// A skill-matching strategy. Implementations must be pure functions of their input.
pub trait SkillMatcher: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Finds vocabulary entries in already lower-cased text.
    fn find_skills(&self, text: &str) -> MatchOutcome;
}

// ────────────────────────────────────────────────────────────────────────────
// DictionaryMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Whole-word / whole-phrase scan of the text for every vocabulary entry.
pub struct DictionaryMatcher {
    vocabulary: Arc<SkillVocabulary>,
}

impl DictionaryMatcher {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        DictionaryMatcher { vocabulary }
    }
}

impl SkillMatcher for DictionaryMatcher {
    fn name(&self) -> &'static str {
        "dictionary"
    }

    fn find_skills(&self, text: &str) -> MatchOutcome {
        let found = self
            .vocabulary
            .skills()
            .iter()
            .filter(|skill| skill.occurs_in(text))
            .map(|skill| skill.name.clone())
            .collect();
        MatchOutcome::Matched(found)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PhraseMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Noun-phrase membership matcher.
///
/// For each phrase, an entry matches if it equals the whole phrase or any single
/// word of it. Multi-word entries therefore only match a phrase they equal exactly,
/// while single-word entries match any phrase containing them.
pub struct PhraseMatcher {
    engine: Arc<PhraseEngine>,
    vocabulary: Arc<SkillVocabulary>,
}

impl PhraseMatcher {
    pub fn new(engine: Arc<PhraseEngine>, vocabulary: Arc<SkillVocabulary>) -> Self {
        PhraseMatcher { engine, vocabulary }
    }
}

impl SkillMatcher for PhraseMatcher {
    fn name(&self) -> &'static str {
        "phrase"
    }

    fn find_skills(&self, text: &str) -> MatchOutcome {
        let phrases = match self.engine.noun_phrases(text) {
            Ok(phrases) => phrases,
            Err(e) => {
                warn!("Phrase matching skipped for this request: {e}");
                return MatchOutcome::Unavailable;
            }
        };

        let mut found = BTreeSet::new();
        for phrase in &phrases {
            let phrase = phrase.trim();
            if let Some(skill) = self.vocabulary.get(phrase) {
                found.insert(skill.to_string());
            }
            for word in phrase.split_whitespace() {
                if let Some(skill) = self.vocabulary.get(word) {
                    found.insert(skill.to_string());
                }
            }
        }
        MatchOutcome::Matched(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Arc<SkillVocabulary> {
        Arc::new(SkillVocabulary::builtin().unwrap())
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn dictionary(text: &str) -> BTreeSet<String> {
        DictionaryMatcher::new(builtin()).find_skills(text).into_skills()
    }

    fn phrase(text: &str) -> MatchOutcome {
        PhraseMatcher::new(Arc::new(PhraseEngine::default()), builtin()).find_skills(text)
    }

    #[test]
    fn test_dictionary_finds_every_isolated_entry() {
        let vocab = builtin();
        let matcher = DictionaryMatcher::new(vocab.clone());
        for skill in vocab.skills() {
            for text in [
                skill.name.clone(),
                format!("skills: {}, more", skill.name),
                format!("({})", skill.name),
            ] {
                let found = matcher.find_skills(&text).into_skills();
                let name = &skill.name;
                assert!(found.contains(name), "{name} not found in {text:?}");
            }
        }
    }

    #[test]
    fn test_dictionary_ignores_entries_inside_larger_words() {
        let found = dictionary("javascripting and gopher");
        assert!(!found.contains("java"));
        assert!(!found.contains("javascript"));
        assert!(!found.contains("go"));
    }

    #[test]
    fn test_dictionary_java_and_javascript_are_distinct() {
        assert_eq!(dictionary("javascript only"), set(&["javascript"]));
        assert_eq!(
            dictionary("java and javascript"),
            set(&["java", "javascript"])
        );
    }

    #[test]
    fn test_dictionary_handles_symbol_entries() {
        let found = dictionary("c++ and c# with node.js; ci/cd pipelines");
        for expected in ["c++", "c#", "node.js", "node", "ci/cd"] {
            assert!(found.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_dictionary_no_match_is_empty() {
        assert!(dictionary("gardening, cooking and hiking").is_empty());
    }

    #[test]
    fn test_phrase_matches_words_inside_phrases() {
        assert_eq!(
            phrase("kubernetes daily, python scripts."),
            MatchOutcome::Matched(set(&["kubernetes", "python"]))
        );
    }

    #[test]
    fn test_phrase_matches_multi_word_entry_only_as_whole_phrase() {
        assert_eq!(
            phrase("experience in machine learning."),
            MatchOutcome::Matched(set(&["machine learning"]))
        );
        // "deep learning" never matches through its constituent words
        assert_eq!(
            phrase("learning algorithms for deep sea robots"),
            MatchOutcome::Matched(set(&[]))
        );
    }

    #[test]
    fn test_phrase_single_word_entry_matches_any_containing_phrase() {
        let found = phrase("a go getter attitude").into_skills();
        assert!(found.contains("go"));
    }

    #[test]
    fn test_phrase_engine_failure_is_unavailable() {
        let engine = Arc::new(PhraseEngine::default().with_max_chars(4));
        let matcher = PhraseMatcher::new(engine, builtin());
        assert_eq!(matcher.find_skills("python"), MatchOutcome::Unavailable);
    }

    #[test]
    fn test_unavailable_contributes_nothing() {
        assert!(MatchOutcome::Unavailable.into_skills().is_empty());
    }
}
