use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Liveness plus a summary of the moving parts.
///
/// The completion provider is not probed: a missing key only shows up as
/// `"unconfigured"` here and as an authentication fault on first use.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let mut services = HashMap::new();

    let provider = if state.config.openai_api_key.is_some() {
        "configured"
    } else {
        "unconfigured"
    };
    services.insert("llm".to_string(), provider.to_string());
    services.insert("model".to_string(), state.chat.completer().model().to_string());
    services.insert("sessions".to_string(), state.sessions.len().await.to_string());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    })
}
