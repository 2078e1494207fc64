use crate::llm_provider::LlmProvider;
use crate::ollama_provider::{OllamaConfig, OllamaProvider};
use cloudaudit_core::{CloudAuditError, LlmConfig, Result};
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "gemini")]
use crate::gemini_provider::{GeminiConfig, GeminiProvider};

/// Factory for creating LLM providers based on configuration
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider from configuration
    pub fn create_from_config(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
        let provider_name = config.provider.to_lowercase();

        match provider_name.as_str() {
            "ollama" => Self::create_ollama_provider(config),
            #[cfg(feature = "gemini")]
            "gemini" => Self::create_gemini_provider(config),
            _ => Err(CloudAuditError::Config(format!(
                "Unsupported LLM provider: {}. Available providers: {}",
                provider_name,
                Self::supported_providers().join(", ")
            ))),
        }
    }

    fn create_ollama_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
        let ollama_config = OllamaConfig {
            model: config.model.clone().unwrap_or_else(|| "llama3".to_string()),
            base_url: config.ollama_url.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        };

        Ok(Arc::new(OllamaProvider::new(ollama_config)?))
    }

    /// Create a Gemini provider
    #[cfg(feature = "gemini")]
    fn create_gemini_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
        let api_key = config
            .gemini_api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                CloudAuditError::Config(
                    "Gemini API key not found. Set 'llm.gemini_api_key' in config \
                     or GEMINI_API_KEY environment variable"
                        .to_string(),
                )
            })?;

        let gemini_config = GeminiConfig {
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| "gemini-1.5-flash".to_string()),
            base_url: config.gemini_base_url.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            timeout_secs: config.timeout_secs,
        };

        Ok(Arc::new(GeminiProvider::new(gemini_config)?))
    }

    /// Get a list of supported providers (based on enabled features)
    pub fn supported_providers() -> Vec<&'static str> {
        let mut providers = vec!["ollama"];

        #[cfg(feature = "gemini")]
        providers.push("gemini");

        providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_providers() {
        let providers = LlmProviderFactory::supported_providers();
        assert!(providers.contains(&"ollama"));
    }

    #[test]
    fn test_ollama_provider_creation() {
        let config = LlmConfig {
            provider: "ollama".to_string(),
            model: Some("llama3".to_string()),
            ..Default::default()
        };

        let provider = LlmProviderFactory::create_from_config(&config).expect("provider");
        assert_eq!(provider.provider_name(), "ollama");
        assert_eq!(provider.model_name(), "llama3");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = LlmConfig {
            provider: "bedrock".to_string(),
            ..Default::default()
        };

        // Result::unwrap_err would need Debug on the provider trait object.
        let err = LlmProviderFactory::create_from_config(&config)
            .err()
            .expect("expected error");
        assert!(err.to_string().contains("Unsupported LLM provider"));
    }

    #[cfg(feature = "gemini")]
    #[test]
    fn test_gemini_provider_uses_configured_key() {
        let config = LlmConfig {
            provider: "gemini".to_string(),
            gemini_api_key: Some("test-key".to_string()),
            ..Default::default()
        };

        let provider = LlmProviderFactory::create_from_config(&config).expect("provider");
        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.model_name(), "gemini-1.5-flash");
    }
}
