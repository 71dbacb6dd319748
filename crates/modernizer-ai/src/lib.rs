pub mod doc_synthesizer;
pub mod llm_factory;
pub mod llm_provider;
pub mod openai_provider;

pub use doc_synthesizer::{build_messages, DocSynthesizer};
pub use llm_factory::LLMProviderFactory;
pub use llm_provider::*;
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
