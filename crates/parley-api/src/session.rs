//! Cookie binding between a browser and its [`ChatSession`](parley_chat::ChatSession).

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use parley_chat::{SessionId, SharedSession};

use crate::state::AppState;

/// Resume the caller's session, opening one when the cookie is absent,
/// malformed or names an expired session.
///
/// The returned jar carries a fresh cookie only when a session was opened.
pub async fn resume(state: &AppState, jar: CookieJar) -> (CookieJar, SessionId, SharedSession) {
    let cookie_name = state.config.session.cookie_name.as_str();
    let raw = jar.get(cookie_name).map(|c| c.value().to_string());

    let (id, session, created) = state.sessions.resume(raw.as_deref()).await;
    if !created {
        return (jar, id, session);
    }

    tracing::info!(session_id = %id, "New session");
    (jar.add(session_cookie(cookie_name, id)), id, session)
}

/// Look up the caller's session without opening a new one
pub async fn current(state: &AppState, jar: &CookieJar) -> Option<(SessionId, SharedSession)> {
    let id = jar
        .get(&state.config.session.cookie_name)
        .and_then(|c| c.value().parse::<SessionId>().ok())?;
    let session = state.sessions.get(&id).await?;
    Some((id, session))
}

pub fn session_cookie(name: &str, id: SessionId) -> Cookie<'static> {
    Cookie::build((name.to_string(), id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), String::new())).path("/").build()
}
