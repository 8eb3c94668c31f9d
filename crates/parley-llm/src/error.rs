use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Authentication failed ({status}): {message}")]
    Authentication { status: u16, message: String },

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: Option<u64>,
    },

    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned no completion text")]
    EmptyCompletion,

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl LlmError {
    /// Credential missing or rejected by the provider
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::Authentication { .. })
    }

    /// Whether resubmitting the same request may succeed.
    ///
    /// Nothing in this crate retries; callers decide.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;
