//! LLM backend implementations.
//!
//! This module provides the model client factory and a unified interface
//! over the hosted chat APIs (Anthropic, OpenAI). The extractor only ever
//! talks to a [`ChatModel`]: system prompt and user message in, text out.

pub mod anthropic;
pub mod openai;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that are not recovered locally: I/O, credential, network and
/// API failures. Decode failures never show up here.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A handle that can answer one system + user exchange with text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: ChatModel + ?Sized> ChatModel for &T {
    async fn invoke(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        (**self).invoke(system_prompt, user_message).await
    }
}

/// Hosted chat API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Anthropic => f.write_str("anthropic"),
            Provider::OpenAI => f.write_str("openai"),
        }
    }
}

/// Everything the factory needs to build a model handle.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    /// Overrides the provider's public endpoint.
    pub base_url: Option<String>,
    pub max_tokens: u32,
    /// `None` means the request may block for as long as the service takes.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(provider: Provider, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            api_key: api_key.into(),
            base_url: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
        }
    }
}

pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Enum-based backend for LLM providers.
pub enum Backend {
    Anthropic(anthropic::AnthropicBackend),
    OpenAI(openai::OpenAIBackend),
}

impl Backend {
    /// Get the backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Anthropic(_) => "anthropic",
            Backend::OpenAI(_) => "openai",
        }
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        match self {
            Backend::Anthropic(b) => &b.model,
            Backend::OpenAI(b) => &b.model,
        }
    }
}

#[async_trait]
impl ChatModel for Backend {
    async fn invoke(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        match self {
            Backend::Anthropic(b) => b.generate(system_prompt, user_message).await,
            Backend::OpenAI(b) => b.generate(system_prompt, user_message).await,
        }
    }
}

/// Create a model handle from explicit configuration.
pub fn create_client(config: &ClientConfig) -> Result<Backend, LlmError> {
    let backend = match config.provider {
        Provider::Anthropic => Backend::Anthropic(anthropic::AnthropicBackend::new(config)?),
        Provider::OpenAI => Backend::OpenAI(openai::OpenAIBackend::new(config)?),
    };
    tracing::debug!("Created {} client for model {}", backend.name(), backend.model());
    Ok(backend)
}

/// Build the shared HTTP client, applying the timeout only when one is set.
fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Join a base URL and an API path, tolerating a trailing slash.
fn endpoint(base_url: &str, path: &str) -> Result<String, LlmError> {
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(LlmError::InvalidUrl(base_url.to_string()));
    }
    Ok(format!("{}{}", base_url.trim_end_matches('/'), path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_anthropic() {
        let config = ClientConfig::new(Provider::Anthropic, "claude-sonnet-4-20250514", "key");
        let backend = create_client(&config).unwrap();
        assert_eq!(backend.name(), "anthropic");
        assert_eq!(backend.model(), "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_create_client_openai() {
        let mut config = ClientConfig::new(Provider::OpenAI, "gpt-4o-mini", "key");
        config.timeout = Some(Duration::from_secs(10));
        let backend = create_client(&config).unwrap();
        assert_eq!(backend.name(), "openai");
        assert_eq!(backend.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_create_client_rejects_bad_base_url() {
        let mut config = ClientConfig::new(Provider::Anthropic, "m", "key");
        config.base_url = Some("localhost:8080".to_string());
        assert!(matches!(create_client(&config), Err(LlmError::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        assert_eq!(
            endpoint("http://127.0.0.1:9000/", "/v1/messages").unwrap(),
            "http://127.0.0.1:9000/v1/messages"
        );
    }

    #[test]
    fn test_io_error_display() {
        let err = LlmError::Io {
            path: PathBuf::from("resume.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read resume.txt: missing");
    }
}
