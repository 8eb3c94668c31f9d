use crate::context::{ContextStrategy, ContextWindow, FullTranscript};
use crate::error::Result;
use crate::turn::Turn;
use parley_llm::{ChatClient, ChatOptions, ChatRequest};
use std::sync::Arc;
use std::time::Instant;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Turns a transcript into one assistant reply via the completion provider.
///
/// Every call goes to the same fixed model. Faults are returned as-is; there is
/// no retry, backoff or fallback.
pub struct Completer {
    client: Arc<dyn ChatClient>,
    model: String,
    options: ChatOptions,
    system_prompt: Option<String>,
    strategy: Arc<dyn ContextStrategy>,
}

impl Completer {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            options: ChatOptions::default(),
            system_prompt: None,
            strategy: Arc::new(FullTranscript),
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn ContextStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request the next assistant reply for `turns`
    pub async fn complete(&self, turns: &[Turn]) -> Result<String> {
        let selected = self.strategy.select(turns);
        let window = ContextWindow::new(self.system_prompt.as_deref(), selected);
        let request = ChatRequest::new(self.model.clone(), window.into_messages())
            .with_options(self.options.clone());

        let started = Instant::now();
        let response = self.client.chat(request).await?;

        tracing::debug!(
            model = %self.model,
            sent_turns = selected.len(),
            total_turns = turns.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
            "Completion received"
        );

        Ok(response.into_text()?)
    }
}
