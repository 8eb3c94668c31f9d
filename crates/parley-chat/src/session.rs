use crate::transcript::Transcript;
use crate::turn::Turn;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Default idle lifetime of a session (24 h)
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 86_400;

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One interactive session and the transcript it exclusively owns
#[derive(Debug)]
pub struct ChatSession {
    id: SessionId,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn append(&mut self, turn: Turn) {
        self.transcript.append(turn);
    }
}

/// A session shared between requests; the mutex serializes submissions
pub type SharedSession = Arc<Mutex<ChatSession>>;

struct SessionEntry {
    session: SharedSession,
    last_seen: DateTime<Utc>,
}

/// Owns every live session.
///
/// Sessions open on first contact, close explicitly via [`SessionStore::close`]
/// or expire after sitting idle for longer than the configured timeout. At
/// most `max_sessions` are live at once; opening one more evicts the least
/// recently seen.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(idle_timeout: std::time::Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: Duration::from_std(idle_timeout)
                .unwrap_or_else(|_| Duration::days(365 * 100)),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Start a fresh, empty session. Also prunes expired sessions.
    pub async fn open(&self) -> (SessionId, SharedSession) {
        let id = SessionId::new();
        let session = Arc::new(Mutex::new(ChatSession::new(id)));
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_seen <= self.idle_timeout);
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(key, _)| *key);
            match oldest {
                Some(oldest) => {
                    sessions.remove(&oldest);
                }
                None => break,
            }
        }
        let pruned = before - sessions.len();
        sessions.insert(
            id,
            SessionEntry {
                session: session.clone(),
                last_seen: now,
            },
        );

        tracing::debug!(session_id = %id, pruned, live = sessions.len(), "Session opened");
        (id, session)
    }

    /// Look up a live session and mark it as seen
    pub async fn get(&self, id: &SessionId) -> Option<SharedSession> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let expired = match sessions.get_mut(id) {
            Some(entry) if now - entry.last_seen <= self.idle_timeout => {
                entry.last_seen = now;
                return Some(entry.session.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            sessions.remove(id);
            tracing::debug!(session_id = %id, "Session expired");
        }
        None
    }

    /// Resume the session named by a cookie value, or open a new one.
    ///
    /// Returns `true` as the last element when a new session was opened.
    pub async fn resume(&self, raw_id: Option<&str>) -> (SessionId, SharedSession, bool) {
        if let Some(id) = raw_id.and_then(|raw| raw.parse::<SessionId>().ok()) {
            if let Some(session) = self.get(&id).await {
                return (id, session, false);
            }
        }
        let (id, session) = self.open().await;
        (id, session, true)
    }

    /// End a session, discarding its transcript
    pub async fn close(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Session closed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS))
    }
}
