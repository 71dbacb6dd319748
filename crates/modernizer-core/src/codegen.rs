use crate::docgen::STATUS_GENERATED;
use crate::error::Result;
use crate::store::ArtifactStore;
use crate::types::{ArtifactArea, SessionId, TargetLanguage};
use std::path::PathBuf;
use std::sync::Arc;

const SERVICE_STEM: &str = "SampleService";
const TEST_STEM: &str = "SampleServiceTest";

/// What a placeholder file stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Service,
    TestSuite,
}

impl PlaceholderKind {
    fn stem(self) -> &'static str {
        match self {
            Self::Service => SERVICE_STEM,
            Self::TestSuite => TEST_STEM,
        }
    }

    fn area(self, lang: TargetLanguage) -> ArtifactArea {
        match self {
            Self::Service => ArtifactArea::Code(lang),
            Self::TestSuite => ArtifactArea::Tests(lang),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub session_id: SessionId,
    pub target_lang: TargetLanguage,
    pub status: String,
    pub location: PathBuf,
}

pub fn file_name(kind: PlaceholderKind, lang: &TargetLanguage) -> String {
    format!("{}.{}", kind.stem(), lang.file_extension())
}

const SERVICE_TEMPLATE: &[&str] = &[
    SERVICE_STEM,
    "Generated by Legacy Modernizer.",
    "Placeholder service: replace with code synthesized from the session documentation.",
];

const TEST_TEMPLATE: &[&str] = &[
    TEST_STEM,
    "Generated by Legacy Modernizer.",
    "Placeholder test suite: replace with tests derived from the documented business rules.",
];

/// Fixed template for `kind`, written as line comments of `lang`.
/// Nothing but the comment marker depends on the language.
pub fn render(kind: PlaceholderKind, lang: &TargetLanguage) -> String {
    let lines = match kind {
        PlaceholderKind::Service => SERVICE_TEMPLATE,
        PlaceholderKind::TestSuite => TEST_TEMPLATE,
    };
    let c = lang.line_comment();
    lines.iter().map(|line| format!("{c} {line}\n")).collect()
}

/// Writes placeholder service and test files for a target language.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    store: Arc<ArtifactStore>,
}

impl CodeGenerator {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub async fn generate_code(
        &self,
        session_id: &SessionId,
        target_lang: TargetLanguage,
    ) -> Result<GeneratedArtifact> {
        self.generate(PlaceholderKind::Service, session_id, target_lang)
            .await
    }

    pub async fn generate_tests(
        &self,
        session_id: &SessionId,
        target_lang: TargetLanguage,
    ) -> Result<GeneratedArtifact> {
        self.generate(PlaceholderKind::TestSuite, session_id, target_lang)
            .await
    }

    async fn generate(
        &self,
        kind: PlaceholderKind,
        session_id: &SessionId,
        target_lang: TargetLanguage,
    ) -> Result<GeneratedArtifact> {
        let contents = render(kind, &target_lang);
        let location = self
            .store
            .write(
                session_id,
                &kind.area(target_lang.clone()),
                &file_name(kind, &target_lang),
                contents,
            )
            .await?;

        Ok(GeneratedArtifact {
            session_id: session_id.clone(),
            target_lang,
            status: STATUS_GENERATED.to_string(),
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> (tempfile::TempDir, CodeGenerator) {
        let tmp = tempfile::tempdir().unwrap();
        let store = Arc::new(ArtifactStore::new(tmp.path()));
        (tmp, CodeGenerator::new(store))
    }

    #[test]
    fn templates_differ_only_in_comment_marker() {
        for kind in [PlaceholderKind::Service, PlaceholderKind::TestSuite] {
            let java = render(kind, &TargetLanguage::Java);
            let python = render(kind, &TargetLanguage::Python);
            let other = render(kind, &TargetLanguage::parse("go").unwrap());

            assert!(java.lines().all(|l| l.starts_with("// ")));
            assert!(python.lines().all(|l| l.starts_with("# ")));
            assert_eq!(java.replace("// ", "# "), python);
            assert_eq!(python, other);
        }
        assert!(render(PlaceholderKind::Service, &TargetLanguage::Java)
            .starts_with("// SampleService\n"));
        assert!(render(PlaceholderKind::TestSuite, &TargetLanguage::Python)
            .starts_with("# SampleServiceTest\n"));
    }

    #[test]
    fn file_names_use_language_extension() {
        assert_eq!(
            file_name(PlaceholderKind::Service, &TargetLanguage::Java),
            "SampleService.java"
        );
        assert_eq!(
            file_name(PlaceholderKind::TestSuite, &TargetLanguage::Python),
            "SampleServiceTest.py"
        );
    }

    #[tokio::test]
    async fn code_lands_in_the_language_directory() {
        let (_tmp, generator) = generator();
        let session = SessionId::generate();

        let artifact = generator
            .generate_code(&session, TargetLanguage::Python)
            .await
            .unwrap();
        assert_eq!(artifact.status, "generated");
        assert!(artifact.location.ends_with("code/python/SampleService.py"));
        assert_eq!(
            std::fs::read_to_string(&artifact.location).unwrap(),
            render(PlaceholderKind::Service, &TargetLanguage::Python)
        );
    }

    #[tokio::test]
    async fn repeated_generation_overwrites() {
        let (_tmp, generator) = generator();
        let session = SessionId::generate();

        let first = generator
            .generate_tests(&session, TargetLanguage::Java)
            .await
            .unwrap();
        std::fs::write(&first.location, "stale").unwrap();
        let second = generator
            .generate_tests(&session, TargetLanguage::Java)
            .await
            .unwrap();

        assert_eq!(first.location, second.location);
        assert!(second.location.ends_with("tests/java/SampleServiceTest.java"));
        assert_eq!(
            std::fs::read_to_string(&second.location).unwrap(),
            render(PlaceholderKind::TestSuite, &TargetLanguage::Java)
        );
        let dir = second.location.parent().unwrap();
        assert_eq!(std::fs::read_dir(dir).unwrap().count(), 1);
    }
}
