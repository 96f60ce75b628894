use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which matching strategies are active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skills-api",
        "phrase_matcher": state.extractor.phrase_matcher_enabled(),
        "vocabulary_size": state.extractor.vocabulary().len(),
    }))
}
