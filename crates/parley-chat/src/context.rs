use crate::error::{ChatError, Result};
use crate::turn::{Role, Turn};
use parley_llm::Message;
use tiktoken_rs::{cl100k_base, CoreBPE};

/// Chat formats add a few tokens of framing per message
const TOKENS_PER_TURN: usize = 4;

/// What gets sent to the provider for one completion call
#[derive(Debug, Clone)]
pub struct ContextWindow {
    pub system_prompt: Option<String>,
    pub messages: Vec<Message>,
}

impl ContextWindow {
    pub fn new(system_prompt: Option<&str>, turns: &[Turn]) -> Self {
        Self {
            system_prompt: system_prompt.map(str::to_string),
            messages: turns.iter().map(Message::from).collect(),
        }
    }

    /// Messages in request order, system prompt first
    pub fn into_messages(self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        if let Some(prompt) = self.system_prompt {
            messages.push(Message::system(prompt));
        }
        messages.extend(self.messages);
        messages
    }
}

/// Strategy for choosing which turns of a transcript go to the provider.
///
/// Strategies only pick a suffix of the transcript; the transcript itself is
/// never modified.
pub trait ContextStrategy: Send + Sync {
    fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn];
}

/// Sends every turn, however long the conversation gets
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTranscript;

impl ContextStrategy for FullTranscript {
    fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn] {
        turns
    }
}

/// Drops the oldest whole turns until the window fits a token budget.
///
/// The newest turn is always kept, even when it alone is over budget, and the
/// window never opens on an assistant turn.
pub struct TokenBudget {
    max_tokens: usize,
    bpe: CoreBPE,
}

impl TokenBudget {
    pub fn new(max_tokens: usize) -> Result<Self> {
        let bpe =
            cl100k_base().map_err(|e| ChatError::Context(format!("Tokenizer error: {}", e)))?;
        Ok(Self { max_tokens, bpe })
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Count tokens in one turn using tiktoken, including per-message framing
    pub fn count_tokens(&self, turn: &Turn) -> usize {
        self.bpe.encode_with_special_tokens(&turn.content).len() + TOKENS_PER_TURN
    }
}

impl ContextStrategy for TokenBudget {
    fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn] {
        if turns.is_empty() {
            return turns;
        }

        let mut start = turns.len() - 1;
        let mut used = self.count_tokens(&turns[start]);
        while start > 0 {
            let cost = self.count_tokens(&turns[start - 1]);
            if used + cost > self.max_tokens {
                break;
            }
            used += cost;
            start -= 1;
        }

        while start < turns.len() - 1 && turns[start].role == Role::Assistant {
            start += 1;
        }

        if start > 0 {
            tracing::debug!(
                dropped = start,
                kept = turns.len() - start,
                max_tokens = self.max_tokens,
                "Context window truncated"
            );
        }

        &turns[start..]
    }
}
