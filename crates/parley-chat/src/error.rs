use parley_llm::LlmError;
use thiserror::Error;

/// Faults surfaced by a submit cycle.
///
/// Blank input is not a fault; see [`crate::SubmitOutcome::Ignored`].
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Completion provider rejected the credentials: {0}")]
    Authentication(#[source] LlmError),

    #[error("Completion provider failed: {0}")]
    Provider(#[source] LlmError),

    #[error("Context window error: {0}")]
    Context(String),
}

impl ChatError {
    /// Short machine-readable name for the fault
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authentication",
            Self::Provider(_) => "provider",
            Self::Context(_) => "context",
        }
    }

    /// Whether the user can reasonably resubmit
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl From<LlmError> for ChatError {
    fn from(err: LlmError) -> Self {
        if err.is_authentication() {
            Self::Authentication(err)
        } else {
            Self::Provider(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
