// Configuration layer for provider-agnostic client creation

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Type of LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    OpenAI,
}

/// Configuration for OpenAI provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// Absent keys are allowed here; the client reports them on first use
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL for OpenAI API (optional, defaults to https://api.openai.com/v1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Provider-specific configuration details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI(OpenAIConfig),
}

impl ProviderConfig {
    /// Create OpenAI provider config
    pub fn openai(config: OpenAIConfig) -> Self {
        Self::OpenAI(config)
    }

    /// Get the provider type
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::OpenAI(_) => ProviderType::OpenAI,
        }
    }
}

/// Factory for creating chat clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_chat_client(config: ProviderConfig) -> Result<Arc<dyn crate::traits::ChatClient>> {
        match config {
            ProviderConfig::OpenAI(openai_config) => {
                let mut builder = crate::openai::OpenAIClient::builder()
                    .maybe_api_key(openai_config.api_key);
                if let Some(base_url) = openai_config.base_url {
                    builder = builder.base_url(base_url);
                }
                Ok(Arc::new(builder.build()?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_config() {
        let config = ProviderConfig::openai(OpenAIConfig::new("test-key"));
        assert_eq!(config.provider_type(), ProviderType::OpenAI);
    }

    #[test]
    fn test_api_key_is_never_serialized() {
        let config = ProviderConfig::openai(
            OpenAIConfig::new("sk-secret").with_base_url("http://localhost:8080/v1"),
        );

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(json.contains("\"type\":\"openai\""));
    }

    #[test]
    fn test_factory_accepts_missing_key() {
        let config = ProviderConfig::openai(OpenAIConfig::default());
        assert!(ClientFactory::create_chat_client(config).is_ok());
    }
}
