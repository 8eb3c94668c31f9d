use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use parley_chat::{SessionId, SubmitOutcome, Turn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{error::ApiError, session, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    /// `None` when the caller has no live session
    pub session_id: Option<SessionId>,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SendMessageResponse {
    Replied { reply: Turn, turn_count: usize },
    Ignored { turn_count: usize },
}

/// GET /api/transcript
///
/// Read-only: a caller without a live session gets an empty transcript and no
/// session is opened for it.
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Json<TranscriptResponse> {
    let body = match session::current(&state, &jar).await {
        Some((session_id, session)) => TranscriptResponse {
            session_id: Some(session_id),
            turns: session.lock().await.transcript().all().to_vec(),
        },
        None => TranscriptResponse {
            session_id: None,
            turns: Vec::new(),
        },
    };
    Json(body)
}

/// POST /api/messages
///
/// The session cookie is set on fault responses too, so a client can resubmit
/// into the session that kept its user turn.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    let (jar, _, session) = session::resume(&state, jar).await;
    let mut session = session.lock().await;

    let outcome = match state.chat.submit(&mut session, &req.content).await {
        Ok(outcome) => outcome,
        Err(e) => return (jar, ApiError::from(e)).into_response(),
    };
    let turn_count = session.transcript().len();

    let body = match outcome {
        SubmitOutcome::Replied(reply) => SendMessageResponse::Replied { reply, turn_count },
        SubmitOutcome::Ignored => SendMessageResponse::Ignored { turn_count },
    };
    (jar, Json(body)).into_response()
}
