//! Configuration management for resume-parser.
//!
//! Configuration is loaded from `~/.config/resume-parser/config.toml`.

use crate::llm::{ClientConfig, Provider, DEFAULT_MAX_TOKENS};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Per-request settings.
    #[serde(default)]
    pub request: RequestConfig,
}

/// Backend configuration for LLM providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Anthropic Claude API.
    Anthropic {
        /// Model name (default: claude-sonnet-4-20250514).
        #[serde(default = "default_anthropic_model")]
        model: String,
        /// API key (prefer ANTHROPIC_API_KEY env var).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    /// OpenAI API.
    OpenAI {
        /// Model name (default: gpt-4o-mini).
        #[serde(default = "default_openai_model")]
        model: String,
        /// API key (prefer OPENAI_API_KEY env var).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Anthropic {
            model: default_anthropic_model(),
            api_key: None,
            base_url: None,
        }
    }
}

fn default_anthropic_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            timeout_secs: None,
        }
    }
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("resume-parser"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, using defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Get the backend type as a string.
    pub fn backend_type(&self) -> &'static str {
        match &self.backend {
            BackendConfig::Anthropic { .. } => "anthropic",
            BackendConfig::OpenAI { .. } => "openai",
        }
    }

    /// Get the model name.
    pub fn model_name(&self) -> &str {
        match &self.backend {
            BackendConfig::Anthropic { model, .. } => model,
            BackendConfig::OpenAI { model, .. } => model,
        }
    }

    /// Resolve the client configuration, reading the API key from the
    /// environment when the file does not set one.
    pub fn client_config(&self, model_override: Option<&str>) -> Result<ClientConfig> {
        self.client_config_with(model_override, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::client_config`] with an explicit environment lookup.
    pub fn client_config_with(
        &self,
        model_override: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientConfig> {
        let (provider, env_var, api_key, base_url) = match &self.backend {
            BackendConfig::Anthropic { api_key, base_url, .. } => {
                (Provider::Anthropic, "ANTHROPIC_API_KEY", api_key, base_url)
            }
            BackendConfig::OpenAI { api_key, base_url, .. } => {
                (Provider::OpenAI, "OPENAI_API_KEY", api_key, base_url)
            }
        };

        let api_key = api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| env(env_var).filter(|key| !key.is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "{} API key not found. Set {} environment variable \
                     or add api_key to config file.",
                    provider,
                    env_var
                )
            })?;

        let model = model_override.unwrap_or(self.model_name());

        let mut client = ClientConfig::new(provider, model, api_key);
        client.base_url = base_url.clone();
        client.max_tokens = self.request.max_tokens;
        client.timeout = self.request.timeout_secs.map(Duration::from_secs);
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(matches!(config.backend, BackendConfig::Anthropic { .. }));
        assert_eq!(config.model_name(), "claude-sonnet-4-20250514");
        assert_eq!(config.request.max_tokens, 4096);
        assert!(config.request.timeout_secs.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("anthropic"));
        assert!(!toml.contains("api_key"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
[backend]
type = "openai"
model = "gpt-4o"
base_url = "http://localhost:8080"

[request]
max_tokens = 2048
timeout_secs = 90
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.backend, BackendConfig::OpenAI { .. }));
        assert_eq!(config.backend_type(), "openai");

        let client = config
            .client_config_with(None, |name| (name == "OPENAI_API_KEY").then(|| "sk-env".to_string()))
            .unwrap();
        assert_eq!(client.provider, Provider::OpenAI);
        assert_eq!(client.model, "gpt-4o");
        assert_eq!(client.api_key, "sk-env");
        assert_eq!(client.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(client.max_tokens, 2048);
        assert_eq!(client.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_api_key_from_file_wins() {
        let toml = r#"
[backend]
type = "anthropic"
api_key = "sk-file"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let client = config
            .client_config_with(Some("claude-3-5-haiku-latest"), |_| Some("sk-env".to_string()))
            .unwrap();
        assert_eq!(client.api_key, "sk-file");
        assert_eq!(client.model, "claude-3-5-haiku-latest");
        assert!(client.timeout.is_none());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = Config::default().client_config_with(None, no_env).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.backend_type(), "anthropic");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.request.timeout_secs = Some(30);

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.request.timeout_secs, Some(30));
        assert_eq!(loaded.model_name(), config.model_name());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend\ntype = ").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
