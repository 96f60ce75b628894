// Skill extraction: vocabulary, matching strategies, merging, and the upload boundary.
// Matching is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod handlers;
pub mod matcher;
pub mod phrases;
pub mod upload;
pub mod vocabulary;

pub use extractor::{SkillExtractor, SkillReport};
pub use phrases::PhraseEngine;
pub use vocabulary::SkillVocabulary;
