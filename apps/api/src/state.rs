use std::sync::Arc;

use crate::config::Config;
use crate::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Vocabulary, matchers and the optional phrase engine. Read-only after startup.
    pub extractor: Arc<SkillExtractor>,
}
