//! Chat core: per-session transcripts, the submit cycle and rendering.
//!
//! ```text
//! input ──► ChatService::submit ──► Transcript::append(user)
//!                 │
//!                 ▼
//!        Completer::complete ──► ContextStrategy ──► ChatClient
//!                 │
//!                 ▼
//!        Transcript::append(assistant) ──► render ──► Vec<Block>
//! ```

pub mod chat;
pub mod completion;
pub mod context;
pub mod error;
pub mod render;
pub mod session;
pub mod transcript;
pub mod turn;

pub use chat::{ChatService, SubmitOutcome};
pub use completion::{Completer, DEFAULT_MODEL};
pub use context::{ContextStrategy, ContextWindow, FullTranscript, TokenBudget};
pub use error::ChatError;
pub use render::{render, render_html, Block, BlockStyle, RenderOptions, Style};
pub use session::{ChatSession, SessionId, SessionStore, SharedSession};
pub use transcript::Transcript;
pub use turn::{Role, Turn};
