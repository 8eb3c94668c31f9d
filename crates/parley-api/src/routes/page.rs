use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use parley_chat::ChatError;
use serde::Deserialize;
use std::sync::Arc;

use crate::{error::chat_error_status, session, state::AppState, templates};

#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

/// GET / : the chat page for the caller's session
pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (jar, _, session) = session::resume(&state, jar).await;
    let session = session.lock().await;
    let page = templates::chat_page(&state, session.transcript(), None);
    (jar, Html(page))
}

/// POST /send : one submit cycle, then Post/Redirect/Get back to the page.
///
/// Blank input redirects like a success. A fault re-renders the page with a
/// banner and a non-2xx status; the user turn stays in the transcript.
pub async fn send(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SendForm>,
) -> Response {
    let (jar, _, session) = session::resume(&state, jar).await;
    let mut session = session.lock().await;

    match state.chat.submit(&mut session, &form.message).await {
        Ok(_) => (jar, Redirect::to("/")).into_response(),
        Err(e) => {
            let status = chat_error_status(&e);
            let banner = fault_banner(&e);
            let page = templates::chat_page(&state, session.transcript(), Some(&banner));
            (status, jar, Html(page)).into_response()
        }
    }
}

fn fault_banner(err: &ChatError) -> String {
    match err {
        ChatError::Authentication(_) => {
            "The chatbot could not authenticate with the AI provider. Check OPENAI_API_KEY."
                .to_string()
        }
        ChatError::Provider(e) if err.is_retryable() => {
            format!("The AI provider is unavailable right now ({}). Please try again.", e)
        }
        ChatError::Provider(e) => format!("The AI provider returned an error: {}", e),
        ChatError::Context(msg) => format!("Could not prepare the conversation: {}", msg),
    }
}
