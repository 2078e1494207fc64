pub mod analyzer;
pub mod llm_provider;
pub mod ollama_provider;
pub mod parser;
pub mod provider_factory;

// Cloud LLM providers
#[cfg(feature = "gemini")]
pub mod gemini_provider;

pub use analyzer::ConfigAnalyzer;
pub use llm_provider::*;
pub use ollama_provider::{OllamaConfig, OllamaProvider};
pub use parser::parse_analysis;
pub use provider_factory::LlmProviderFactory;

#[cfg(feature = "gemini")]
pub use gemini_provider::{GeminiConfig, GeminiProvider};
