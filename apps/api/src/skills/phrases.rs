//! Phrase Engine — rule-based noun-phrase chunker used by the phrase matcher.
//!
//! A phrase is a maximal run of content words. Runs are closed by punctuation,
//! opening brackets or quotes, bare numbers, and closed-class words (determiners,
//! pronouns, prepositions, conjunctions, auxiliaries, common resume verbs).
//!
//! The engine is optional. `PhraseEngine::load` returns `None` when it is disabled
//! or its stopword list cannot be read, and the service runs dictionary-only.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

/// Longest input, in characters, the engine accepts per call.
pub const MAX_TEXT_CHARS: usize = 1_000_000;

const OPENING: &[char] = &['(', '[', '{', '<', '"', '\''];
const CLOSING: &[char] = &[',', ';', ':', '!', '?', '.', ')', ']', '}', '>', '"', '\''];

/// Closed-class English words plus verbs that open most resume bullet points.
const DEFAULT_STOPWORDS: &[&str] = &[
    "a",
    "an",
    "the",
    "this",
    "that",
    "these",
    "those",
    "each",
    "every",
    "some",
    "any",
    "all",
    "both",
    "such",
    "other",
    "another",
    "i",
    "me",
    "my",
    "mine",
    "we",
    "us",
    "our",
    "you",
    "your",
    "he",
    "him",
    "his",
    "she",
    "her",
    "it",
    "its",
    "they",
    "them",
    "their",
    "who",
    "whom",
    "which",
    "what",
    "where",
    "when",
    "how",
    "why",
    "and",
    "or",
    "but",
    "nor",
    "so",
    "yet",
    "if",
    "then",
    "than",
    "as",
    "while",
    "because",
    "although",
    "of",
    "in",
    "on",
    "at",
    "to",
    "for",
    "with",
    "without",
    "by",
    "from",
    "into",
    "onto",
    "over",
    "under",
    "about",
    "across",
    "through",
    "during",
    "within",
    "between",
    "among",
    "via",
    "per",
    "up",
    "down",
    "out",
    "off",
    "is",
    "are",
    "was",
    "were",
    "be",
    "been",
    "being",
    "am",
    "have",
    "has",
    "had",
    "having",
    "do",
    "does",
    "did",
    "will",
    "would",
    "shall",
    "should",
    "can",
    "could",
    "may",
    "might",
    "must",
    "not",
    "no",
    "very",
    "also",
    "too",
    "just",
    "only",
    "more",
    "most",
    "use",
    "used",
    "uses",
    "using",
    "work",
    "worked",
    "working",
    "works",
    "build",
    "built",
    "building",
    "develop",
    "developed",
    "developing",
    "design",
    "designed",
    "designing",
    "create",
    "created",
    "creating",
    "implement",
    "implemented",
    "implementing",
    "lead",
    "led",
    "leading",
    "manage",
    "managed",
    "managing",
    "maintain",
    "maintained",
    "improve",
    "improved",
    "deploy",
    "deployed",
    "deploying",
    "write",
    "wrote",
    "written",
    "writing",
    "know",
    "knows",
    "knowing",
    "like",
    "including",
    "include",
    "includes",
];

/// Default stopword set, shared by every engine built without a stopword file.
static DEFAULT_STOPWORD_SET: Lazy<HashSet<String>> =
    Lazy::new(|| DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect());

#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("Text of {len} characters exceeds the phrase engine limit of {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("Failed to read stopword list {path}: {source}")]
    StopwordsUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stopword list {0} contains no words")]
    StopwordsEmpty(String),
}

/// The loaded noun-phrase chunker. Immutable after construction; safe to share.
#[derive(Debug, Clone)]
pub struct PhraseEngine {
    stopwords: HashSet<String>,
    max_chars: usize,
}

impl Default for PhraseEngine {
    fn default() -> Self {
        PhraseEngine {
            stopwords: DEFAULT_STOPWORD_SET.clone(),
            max_chars: MAX_TEXT_CHARS,
        }
    }
}

impl PhraseEngine {
    /// Loads the engine per config. Any failure is logged and reported as `None`.
    pub fn load(config: &Config) -> Option<Self> {
        if !config.enable_phrase_matcher {
            info!("Phrase matcher disabled by configuration");
            return None;
        }

        let engine = match config.phrase_stopwords_path.as_deref() {
            Some(path) => Self::from_stopwords_file(path),
            None => Ok(Self::default()),
        };

        match engine {
            Ok(engine) => {
                info!(
                    "Phrase engine loaded ({} stopwords)",
                    engine.stopwords.len()
                );
                Some(engine)
            }
            Err(e) => {
                warn!("Phrase engine not available, using dictionary matching only: {e}");
                None
            }
        }
    }

    /// Reads one stopword per line. Blank lines and `#` comments are ignored.
    pub fn from_stopwords_file(path: impl AsRef<Path>) -> Result<Self, PhraseError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            PhraseError::StopwordsUnreadable {
                path: display.clone(),
                source,
            }
        })?;

        let stopwords: HashSet<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        if stopwords.is_empty() {
            return Err(PhraseError::StopwordsEmpty(display));
        }

        Ok(PhraseEngine {
            stopwords,
            max_chars: MAX_TEXT_CHARS,
        })
    }

    #[cfg(test)]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Splits lowercase text into noun phrases, in text order.
    pub fn noun_phrases(&self, text: &str) -> Result<Vec<String>, PhraseError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(PhraseError::TextTooLong {
                len,
                max: self.max_chars,
            });
        }

        let mut phrases = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            let word = raw.trim_start_matches(OPENING);
            if word.len() != raw.len() {
                flush(&mut current, &mut phrases);
            }

            let core = word.trim_end_matches(CLOSING);
            let closes = core.len() != word.len();

            if self.is_boundary_word(core) {
                flush(&mut current, &mut phrases);
            } else {
                current.push(core);
            }

            if closes {
                flush(&mut current, &mut phrases);
            }
        }
        flush(&mut current, &mut phrases);

        Ok(phrases)
    }

    fn is_boundary_word(&self, word: &str) -> bool {
        word.is_empty()
            || self.stopwords.contains(word)
            || word.chars().all(|c| !c.is_alphabetic())
    }
}

fn flush(current: &mut Vec<&str>, phrases: &mut Vec<String>) {
    if !current.is_empty() {
        phrases.push(current.join(" "));
        current.clear();
    }
}
