use crate::llm_provider::LLMProvider;
use crate::openai_provider::{OpenAIConfig, OpenAIProvider};
use anyhow::{anyhow, Result};
use modernizer_core::LlmConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Factory for creating LLM providers based on configuration
pub struct LLMProviderFactory;

impl LLMProviderFactory {
    /// Builds the configured provider.
    ///
    /// Returns `Ok(None)` when no credential is available: the service still
    /// runs, only LLM-assisted features are unavailable.
    pub fn create_from_config(config: &LlmConfig) -> Result<Option<Arc<dyn LLMProvider>>> {
        let Some(api_key) = config.resolve_api_key() else {
            warn!(
                "No LLM credential configured (set {}); LLM-assisted documentation is disabled",
                modernizer_core::LLM_API_KEY_ENV
            );
            return Ok(None);
        };

        let provider_name = config.provider.to_lowercase();
        let provider: Arc<dyn LLMProvider> = match provider_name.as_str() {
            "openai" | "openai-compatible" => Arc::new(OpenAIProvider::new(OpenAIConfig {
                api_key,
                base_url: config.base_url.clone(),
                model: config.model.clone(),
                timeout_secs: config.timeout_secs,
                provider_name,
            })?),
            _ => {
                return Err(anyhow!(
                    "Unsupported LLM provider: {}. Available providers: openai, openai-compatible",
                    config.provider
                ))
            }
        };

        info!(
            provider = provider.provider_name(),
            model = provider.model_name(),
            "LLM provider configured"
        );
        Ok(Some(provider))
    }
}
