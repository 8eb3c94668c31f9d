use axum::{extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::{session, state::AppState};

/// DELETE /api/session : end the caller's session and drop its cookie
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (StatusCode, CookieJar) {
    if let Some((id, _)) = session::current(&state, &jar).await {
        state.sessions.close(&id).await;
        tracing::info!(session_id = %id, "Session ended");
    }

    let jar = jar.remove(session::removal_cookie(&state.config.session.cookie_name));
    (StatusCode::NO_CONTENT, jar)
}
