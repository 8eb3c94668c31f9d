use config::{Config as ConfigLoader, ConfigError, Environment, File};
use parley_chat::{RenderOptions, Style, DEFAULT_MODEL};
use parley_llm::{ChatOptions, OpenAIConfig, ProviderConfig};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub llm: LlmConfig,
    pub ui: UiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,

    // Secret (from ENV only)
    #[serde(skip)]
    pub openai_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            request_timeout_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub system_prompt: Option<String>,
    /// Token budget for the outbound window; unset sends the whole transcript
    pub max_context_tokens: Option<usize>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            temperature: None,
            max_output_tokens: None,
            system_prompt: None,
            max_context_tokens: None,
        }
    }
}

impl LlmConfig {
    pub fn provider_config(&self, api_key: Option<String>) -> ProviderConfig {
        ProviderConfig::openai(OpenAIConfig {
            api_key,
            base_url: self.base_url.clone(),
        })
    }

    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    pub subtitle: String,
    /// Defaults depend on the style when unset
    pub input_label: Option<String>,
    pub style: Style,
    pub user_label: String,
    pub assistant_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "💬 AI Chatbot using NLP".to_string(),
            subtitle: "This chatbot uses OpenAI's GPT model to interact intelligently with users."
                .to_string(),
            input_label: None,
            style: Style::Styled,
            user_label: "You".to_string(),
            assistant_label: "Chatbot".to_string(),
        }
    }
}

impl UiConfig {
    pub fn input_label(&self) -> &str {
        match (&self.input_label, self.style) {
            (Some(label), _) => label.as_str(),
            (None, Style::Styled) => "Type your message here 👇",
            (None, Style::Plain) => "You:",
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            style: self.style,
            user_label: self.user_label.clone(),
            assistant_label: self.assistant_label.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub idle_timeout_secs: u64,
    /// Live sessions kept at once; the least recently seen is evicted beyond this
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "parley_session".to_string(),
            idle_timeout_secs: parley_chat::session::DEFAULT_IDLE_TIMEOUT_SECS,
            max_sessions: parley_chat::session::DEFAULT_MAX_SESSIONS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. Built-in defaults
    /// 2. config/default.toml
    /// 3. config/{ENV}.toml (ENV defaults to "dev")
    /// 4. PARLEY_<SECTION>__<KEY> environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("PARLEY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        // Missing key is not fatal: it surfaces on the first completion call
        cfg.openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        cfg.validate()?;
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.session.max_sessions == 0 {
            return Err(ConfigError::Message(
                "session.max_sessions must be greater than zero".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Message("llm.model must not be empty".to_string()));
        }
        if self.llm.max_context_tokens == Some(0) {
            return Err(ConfigError::Message(
                "llm.max_context_tokens must be greater than zero".to_string(),
            ));
        }
        if self.session.cookie_name.is_empty()
            || !self
                .session
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Message(format!(
                "session.cookie_name '{}' is not a valid cookie name",
                self.session.cookie_name
            )));
        }
        Ok(())
    }
}
