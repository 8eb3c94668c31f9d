pub mod config;
pub mod error;
pub mod openai;
pub mod traits;
pub mod types;

pub use config::{ClientFactory, OpenAIConfig, ProviderConfig, ProviderType};
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
pub use types::{Message, Role};
