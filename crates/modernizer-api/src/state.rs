use modernizer_ai::{DocSynthesizer, LLMProvider, LLMProviderFactory};
use modernizer_core::{
    ArtifactStore, CodeGenerator, DocumentGenerator, EvaluationReporter, SessionAllocator,
    Settings,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<ArtifactStore>,
    pub sessions: Arc<SessionAllocator>,
    pub documents: Arc<DocumentGenerator>,
    pub evaluation: Arc<EvaluationReporter>,
    pub codegen: Arc<CodeGenerator>,
    /// `None` when no LLM credential is configured.
    pub synthesizer: Option<Arc<DocSynthesizer>>,
}

impl AppState {
    /// State wired from settings; the LLM provider comes from
    /// [`LLMProviderFactory`] and is absent without a credential.
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let provider = LLMProviderFactory::create_from_config(&settings.llm)?;
        Ok(Self::with_provider(settings, provider))
    }

    /// State with an explicitly supplied provider (or none).
    pub fn with_provider(settings: Settings, provider: Option<Arc<dyn LLMProvider>>) -> Self {
        let store = Arc::new(ArtifactStore::new(settings.storage.output_root.clone()));
        let synthesizer = provider
            .map(|provider| Arc::new(DocSynthesizer::with_config(provider, &settings.llm)));

        Self {
            sessions: Arc::new(SessionAllocator::new(store.clone())),
            documents: Arc::new(DocumentGenerator::new(store.clone())),
            evaluation: Arc::new(EvaluationReporter::new(store.clone())),
            codegen: Arc::new(CodeGenerator::new(store.clone())),
            store,
            synthesizer,
            settings: Arc::new(settings),
        }
    }

    pub fn llm_configured(&self) -> bool {
        self.synthesizer.is_some()
    }
}
