//! Chat-completion provider configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The type of chat-completion provider to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderType {
    /// Azure OpenAI deployment (api-key header, deployment-scoped URL)
    Azure {
        /// Resource endpoint, e.g. "https://my-resource.openai.azure.com"
        endpoint: String,
        /// Deployment name
        deployment: String,
        /// API version query parameter, e.g. "2024-06-01"
        api_version: String,
    },
    /// OpenAI-compatible API (OpenAI, Ollama, vLLM, LocalAI, etc.)
    OpenAI {
        /// Base URL for the API, e.g. "https://api.openai.com/v1"
        base_url: String,
    },
}

impl ProviderType {
    /// Creates an OpenAI-compatible provider with the given base URL.
    #[must_use]
    pub fn openai_compatible(base_url: impl Into<String>) -> Self {
        Self::OpenAI {
            base_url: base_url.into(),
        }
    }

    /// Creates an Azure OpenAI provider.
    #[must_use]
    pub fn azure(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self::Azure {
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_version: api_version.into(),
        }
    }
}

/// Configuration for a chat-completion client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider
    #[serde(flatten)]
    pub provider: ProviderType,
    /// The API key for authentication (may be empty for local providers)
    #[serde(default)]
    pub api_key: String,
    /// The model to use (ignored by Azure, where the deployment selects it)
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

impl ProviderConfig {
    /// Creates a configuration for an Azure OpenAI deployment.
    #[must_use]
    pub fn azure(
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            provider: ProviderType::azure(endpoint, deployment, api_version),
            api_key: api_key.into(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
        }
    }

    /// Creates a configuration for an OpenAI-compatible API.
    #[must_use]
    pub fn openai_compatible(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: ProviderType::openai_compatible(base_url),
            api_key: String::new(),
            model: model.into(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets the maximum tokens to generate.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
