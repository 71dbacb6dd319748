use crate::llm_provider::{GenerationConfig, LLMProvider, LLMResult, Message};
use modernizer_core::LlmConfig;
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are a senior software engineer specialising in legacy \
code modernization. You read legacy programs (COBOL, Visual Basic, old Java and similar) and \
explain them precisely to engineers who will rewrite them.";

/// Builds the documentation prompt for a code snippet.
pub fn build_messages(code: &str, language: Option<&str>) -> Vec<Message> {
    let language = language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("unknown");

    let user = format!(
        "Document the following legacy code.\n\
         Source language: {language}\n\n\
         Respond with a single JSON object with these keys:\n\
         - \"purpose\": what the code is for, in one or two sentences\n\
         - \"inputs\": list of inputs (parameters, files, records, screens)\n\
         - \"outputs\": list of outputs and side effects\n\
         - \"main_steps\": ordered list of the main processing steps\n\
         - \"business_rules\": list of business rules encoded in the logic\n\n\
         Code:\n```\n{code}\n```"
    );

    vec![Message::system(SYSTEM_PROMPT), Message::user(user)]
}

/// LLM-assisted documentation for a single snippet.
///
/// The model's reply is handed back untouched; callers decide whether to
/// parse it.
pub struct DocSynthesizer {
    provider: Arc<dyn LLMProvider>,
    generation: GenerationConfig,
}

impl DocSynthesizer {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider,
            generation: GenerationConfig::default(),
        }
    }

    pub fn with_config(provider: Arc<dyn LLMProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            generation: GenerationConfig {
                temperature: config.temperature,
                max_tokens: Some(config.max_tokens),
                stop: None,
            },
        }
    }

    pub async fn synthesize(&self, code: &str, language: Option<&str>) -> LLMResult<String> {
        let messages = build_messages(code, language);
        debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            code_bytes = code.len(),
            "Requesting LLM documentation"
        );
        let response = self
            .provider
            .generate_chat(&messages, &self.generation)
            .await?;
        Ok(response.content)
    }
}
