use crate::llm_provider::LlmProvider;
use crate::provider_factory::LlmProviderFactory;
use cloudaudit_core::{Result, Settings};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Builds the fixed security-analysis prompt and forwards it to the
/// configured model service.
///
/// Holds the provider client for the whole process lifetime; one instance is
/// constructed at startup and shared across requests.
pub struct ConfigAnalyzer {
    provider: Arc<dyn LlmProvider>,
}

impl ConfigAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Construct the analyzer from settings via the provider factory.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = LlmProviderFactory::create_from_config(&settings.llm)?;
        info!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            "Configured model provider"
        );
        Ok(Self::new(provider))
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Send the configuration to the model service and return its reply
    /// verbatim. Provider errors propagate unchanged; there is no retry.
    pub async fn analyze(&self, config: &Value) -> Result<String> {
        let prompt = build_prompt(config)?;
        debug!(prompt_chars = prompt.len(), "Requesting configuration analysis");

        let generated = self.provider.generate(&prompt).await?;
        info!(
            model = %generated.model,
            reply_chars = generated.text.len(),
            "Received configuration analysis"
        );
        Ok(generated.text)
    }
}

/// Embeds the pretty-printed configuration into the fixed instruction
/// template. The template pins the reply format the response parser expects:
/// `[SUMMARY]`, `[ISSUES]` with `---`-separated four-line blocks, and an
/// optional `[CONCLUSION]`.
pub fn build_prompt(config: &Value) -> Result<String> {
    let rendered = serde_json::to_string_pretty(config)?;
    Ok(format!(
        r#"You are a cloud security auditor. Analyze the following cloud configuration JSON for security issues.

Configuration:
{rendered}

Respond in exactly this format:

[SUMMARY]
A brief summary of the overall security posture.

[ISSUES]
Issue: short title of the finding
Severity: HIGH|MEDIUM|LOW
Description: what is wrong and why it matters
Recommendation: concrete mitigation steps
---
Repeat the Issue/Severity/Description/Recommendation block for every finding, separating blocks with a line containing only "---".

[CONCLUSION]
One final recommendation per line.
"#
    ))
}
