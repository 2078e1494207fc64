use async_trait::async_trait;
use cloudaudit_core::Result;

/// Text produced by one model invocation.
#[derive(Debug, Clone)]
pub struct GeneratedText {
    /// Generated text content, verbatim
    pub text: String,
    /// Model that produced the text
    pub model: String,
    /// Tokens consumed by the prompt, when the service reports them
    pub prompt_tokens: Option<usize>,
    /// Tokens generated in the reply, when the service reports them
    pub completion_tokens: Option<usize>,
}

/// A hosted text-generation service.
///
/// The analysis pipeline depends only on this signature; which vendor sits
/// behind it is decided once at startup from configuration.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate free text for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<GeneratedText>;

    /// Check if the provider is reachable and ready.
    async fn is_available(&self) -> bool;

    /// Name of this provider
    fn provider_name(&self) -> &str;

    /// Model identifier the provider will generate with
    fn model_name(&self) -> &str;
}
