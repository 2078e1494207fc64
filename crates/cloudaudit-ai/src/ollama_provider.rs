use crate::llm_provider::{GeneratedText, LlmProvider};
use async_trait::async_trait;
use cloudaudit_core::{CloudAuditError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Configuration for a local Ollama inference endpoint
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: usize,
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
            base_url: "http://localhost:11434".to_string(),
            temperature: 0.2,
            max_output_tokens: 2048,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    eval_count: Option<usize>,
    #[serde(default)]
    prompt_eval_count: Option<usize>,
}

/// Ollama LLM provider
pub struct OllamaProvider {
    config: OllamaConfig,
    client: Client,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CloudAuditError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/api/generate",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<GeneratedText> {
        let start = Instant::now();
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_output_tokens,
            },
        };

        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "Sending generate request to Ollama"
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CloudAuditError::Timeout(format!(
                        "Ollama request timed out after {:?}",
                        self.config.timeout
                    ))
                } else {
                    CloudAuditError::Network(format!("Ollama request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CloudAuditError::External(format!(
                "Ollama API error: {}",
                error_text
            )));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CloudAuditError::Parse(format!("Failed to parse Ollama response: {}", e)))?;

        info!(
            model = %self.config.model,
            duration_ms = start.elapsed().as_millis() as u64,
            completion_tokens = ?data.eval_count,
            "Ollama generation completed"
        );

        Ok(GeneratedText {
            text: data.response,
            model: self.config.model.clone(),
            prompt_tokens: data.prompt_eval_count,
            completion_tokens: data.eval_count,
        })
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url.trim_end_matches('/'));
        self.client
            .get(url)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_strips_trailing_slash() {
        let provider = OllamaProvider::new(OllamaConfig {
            base_url: "http://localhost:11434/".into(),
            ..Default::default()
        })
        .expect("provider");
        assert_eq!(provider.generate_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            model: "llama3".into(),
            prompt: "hi".into(),
            stream: false,
            options: GenerateOptions {
                temperature: 0.2,
                num_predict: 128,
            },
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["model"], "llama3");
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["num_predict"], 128);
    }

    #[test]
    fn test_response_parses_without_token_counts() {
        let data: GenerateResponse =
            serde_json::from_str(r#"{"response": "some text"}"#).expect("deserialize");
        assert_eq!(data.response, "some text");
        assert!(data.eval_count.is_none());
    }
}
