use std::sync::Arc;
use std::time::Duration;

use parley_chat::{ChatError, ChatService, Completer, RenderOptions, SessionStore, TokenBudget};
use parley_llm::ChatClient;

use crate::config::Config;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub chat: Arc<ChatService>,
    pub render_options: RenderOptions,
}

impl AppState {
    pub fn new(config: Config, client: Arc<dyn ChatClient>) -> Result<Self, ChatError> {
        let mut completer = Completer::new(client, config.llm.model.clone())
            .with_options(config.llm.chat_options());

        if let Some(prompt) = config.llm.system_prompt.as_deref() {
            completer = completer.with_system_prompt(prompt);
        }

        if let Some(max_tokens) = config.llm.max_context_tokens {
            let budget = TokenBudget::new(max_tokens)?;
            tracing::info!(max_tokens = budget.max_tokens(), "Using token budget context window");
            completer = completer.with_strategy(Arc::new(budget));
        }

        let sessions = SessionStore::new(Duration::from_secs(config.session.idle_timeout_secs))
            .with_max_sessions(config.session.max_sessions);
        let render_options = config.ui.render_options();

        Ok(Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            chat: Arc::new(ChatService::new(completer)),
            render_options,
        })
    }
}
