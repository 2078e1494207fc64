use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config as cfg;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// Model-service configuration.
///
/// The provider string selects the concrete client; credentials may also come
/// from the environment (`GEMINI_API_KEY`) at provider construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider: "gemini" or "ollama"
    #[serde(default = "LlmConfig::default_provider")]
    pub provider: String,

    /// Model identifier
    /// For Gemini: model name (e.g., "gemini-1.5-flash")
    /// For Ollama: model name (e.g., "llama3")
    #[serde(default)]
    pub model: Option<String>,

    /// Gemini API key
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini API base URL
    #[serde(default = "LlmConfig::default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Ollama URL
    #[serde(default = "LlmConfig::default_ollama_url")]
    pub ollama_url: String,

    /// Temperature for generation
    #[serde(default = "LlmConfig::default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "LlmConfig::default_max_output_tokens")]
    pub max_output_tokens: usize,

    /// Request timeout in seconds
    #[serde(default = "LlmConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl LlmConfig {
    fn default_provider() -> String {
        "gemini".to_string()
    }

    fn default_gemini_base_url() -> String {
        "https://generativelanguage.googleapis.com/v1beta".to_string()
    }

    fn default_ollama_url() -> String {
        "http://localhost:11434".to_string()
    }

    fn default_temperature() -> f32 {
        0.2
    }

    fn default_max_output_tokens() -> usize {
        2048
    }

    fn default_timeout_secs() -> u64 {
        120
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Self::default_provider(),
            model: None,
            gemini_api_key: None,
            gemini_base_url: Self::default_gemini_base_url(),
            ollama_url: Self::default_ollama_url(),
            temperature: Self::default_temperature(),
            max_output_tokens: Self::default_max_output_tokens(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "Settings::default_env")]
    pub env: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Self::default_env(),
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    fn default_env() -> String {
        env::var("APP_ENV")
            .ok()
            .or_else(|| env::var("RUST_ENV").ok())
            .unwrap_or_else(|| "development".to_string())
    }

    /// Load settings from the default config directory and the environment.
    pub fn load() -> Result<Self> {
        let config_dir = Self::default_config_dir();
        let env_name = Self::default_env();
        Self::load_from_sources(&config_dir, &env_name)
    }

    /// Default configuration directory: `./config` when present, else the
    /// current directory.
    pub fn default_config_dir() -> PathBuf {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let project_config = cwd.join("config");
        if project_config.exists() {
            info!("Using config directory: {:?}", project_config);
            return project_config;
        }
        cwd
    }

    /// Layered load: `default.toml` -> `{env}.toml` -> `local.toml` ->
    /// `CLOUDAUDIT__*` environment variables. Every file is optional.
    pub fn load_from_sources(config_dir: &Path, env_name: &str) -> Result<Self> {
        let builder = cfg::Config::builder()
            .add_source(cfg::File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                cfg::File::from(config_dir.join(format!("{}.toml", env_name))).required(false),
            )
            .add_source(cfg::File::from(config_dir.join("local.toml")).required(false))
            .add_source(cfg::Environment::with_prefix("CLOUDAUDIT").separator("__"));

        let settings: Settings = builder
            .build()
            .context("building configuration")?
            .try_deserialize()
            .context("deserializing configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.server.host.trim().is_empty(),
            "server.host cannot be empty"
        );
        anyhow::ensure!(self.server.port > 0, "server.port must be > 0");
        anyhow::ensure!(
            matches!(self.llm.provider.as_str(), "gemini" | "ollama"),
            "llm.provider must be one of: gemini, ollama"
        );
        anyhow::ensure!(
            self.llm.timeout_secs > 0,
            "llm.timeout_secs must be > 0"
        );
        anyhow::ensure!(
            self.llm.max_output_tokens > 0,
            "llm.max_output_tokens must be > 0"
        );
        Ok(())
    }
}
