pub mod handlers;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Legacy Modernization Platform",
        description = "Ingest legacy code (VB, COBOL, Java), generate documentation, evaluate quality, and synthesize modern Java/Python services with tests.",
        version = "0.1.0"
    ),
    paths(
        handlers::ingest_legacy_code,
        handlers::generate_documentation,
        handlers::generate_documentation_llm,
        handlers::get_documentation_metrics,
        handlers::generate_target_code,
        handlers::generate_unit_tests,
        handlers::list_session_artifacts,
        crate::handlers::health,
    ),
    components(
        schemas(
            handlers::IngestUpload,
            handlers::IngestResponse,
            handlers::DocumentResponse,
            handlers::LlmDocumentationRequest,
            handlers::LlmDocumentationResponse,
            handlers::CoverageDto,
            handlers::ModuleConfidenceDto,
            handlers::ConfidenceDto,
            handlers::HotspotDto,
            handlers::MetricsResponse,
            handlers::CodegenResponse,
            handlers::TestgenResponse,
            handlers::SessionArtifactsResponse,
            crate::handlers::HealthResponse,
        )
    ),
    tags(
        (name = "ingest", description = "Legacy code ingestion"),
        (name = "documentation", description = "Documentation generation"),
        (name = "evaluation", description = "Documentation quality metrics"),
        (name = "code-generation", description = "Target code generation"),
        (name = "test-generation", description = "Unit test generation"),
        (name = "sessions", description = "Session artifacts"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
