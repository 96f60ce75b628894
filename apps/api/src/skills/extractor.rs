//! Skill Extractor — normalizes text, runs every available matcher and merges the results.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::skills::matcher::{DictionaryMatcher, PhraseMatcher, SkillMatcher};
use crate::skills::phrases::PhraseEngine;
use crate::skills::vocabulary::SkillVocabulary;

/// Response body of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillReport {
    /// Matched vocabulary entries, deduplicated and sorted.
    pub skills: Vec<String>,
    pub count: usize,
}

impl SkillReport {
    fn from_set(skills: BTreeSet<String>) -> Self {
        let skills: Vec<String> = skills.into_iter().collect();
        SkillReport {
            count: skills.len(),
            skills,
        }
    }
}

/// Immutable extraction pipeline, built once at startup.
pub struct SkillExtractor {
    vocabulary: Arc<SkillVocabulary>,
    dictionary: DictionaryMatcher,
    phrase: Option<PhraseMatcher>,
}

impl SkillExtractor {
    /// `engine: None` means the phrase engine is unavailable: dictionary-only mode.
    pub fn new(vocabulary: Arc<SkillVocabulary>, engine: Option<Arc<PhraseEngine>>) -> Self {
        SkillExtractor {
            dictionary: DictionaryMatcher::new(vocabulary.clone()),
            phrase: engine.map(|engine| PhraseMatcher::new(engine, vocabulary.clone())),
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn phrase_matcher_enabled(&self) -> bool {
        self.phrase.is_some()
    }

    fn matchers(&self) -> impl Iterator<Item = &dyn SkillMatcher> + '_ {
        std::iter::once(&self.dictionary as &dyn SkillMatcher)
            .chain(self.phrase.as_ref().map(|m| m as &dyn SkillMatcher))
    }

    /// Lower-cases `text`, runs all matchers and returns the merged report.
    pub fn extract(&self, text: &str) -> SkillReport {
        let normalized = text.to_lowercase();

        let mut merged = BTreeSet::new();
        for matcher in self.matchers() {
            let found = matcher.find_skills(&normalized).into_skills();
            debug!(
                matcher = matcher.name(),
                found = found.len(),
                "Matcher finished"
            );
            merged.extend(found);
        }

        SkillReport::from_set(merged)
    }
}
