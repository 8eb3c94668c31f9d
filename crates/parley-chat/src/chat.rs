use crate::completion::Completer;
use crate::error::Result;
use crate::session::ChatSession;
use crate::turn::Turn;

/// Result of one submit cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input: nothing appended, provider not called
    Ignored,
    /// The assistant turn that was appended
    Replied(Turn),
}

/// The submit handler: append the user turn, ask the provider, append the reply.
pub struct ChatService {
    completer: Completer,
}

impl ChatService {
    pub fn new(completer: Completer) -> Self {
        Self { completer }
    }

    pub fn completer(&self) -> &Completer {
        &self.completer
    }

    /// Run one submission against `session`.
    ///
    /// On a provider fault the user turn stays in the transcript, no assistant
    /// turn is added and the fault is returned to the caller.
    pub async fn submit(&self, session: &mut ChatSession, input: &str) -> Result<SubmitOutcome> {
        if input.trim().is_empty() {
            tracing::debug!(session_id = %session.id(), "Ignoring blank submission");
            return Ok(SubmitOutcome::Ignored);
        }

        session.append(Turn::user(input));

        let reply = match self.completer.complete(session.transcript().all()).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id(),
                    kind = e.kind(),
                    retryable = e.is_retryable(),
                    "Completion failed: {}",
                    e
                );
                return Err(e);
            }
        };

        let turn = Turn::assistant(reply);
        session.append(turn.clone());

        tracing::info!(
            session_id = %session.id(),
            turns = session.transcript().len(),
            "Submission completed"
        );

        Ok(SubmitOutcome::Replied(turn))
    }
}
