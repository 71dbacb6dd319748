use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use modernizer_core::{
    EvaluationMetrics, GeneratedArtifact, SessionId, TargetLanguage, UploadedFile,
};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

const UPLOAD_FIELD: &str = "files";

fn display_path(path: &FsPath) -> String {
    path.display().to_string()
}

// -------- Ingest --------

/// Multipart form: repeat the `files` part once per uploaded file.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct IngestUpload {
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    pub session_id: String,
    /// Storage path of every uploaded file, in upload order
    pub files: Vec<String>,
}

/// Ingest a legacy codebase (VB, COBOL, Java, ...) into a new session
#[utoipa::path(
    post,
    path = "/ingest/legacy-code",
    tag = "ingest",
    request_body(content = IngestUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Session created", body = IngestResponse),
        (status = 400, description = "Malformed upload or unsafe file name"),
        (status = 413, description = "Upload exceeds server.max_upload_bytes"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn ingest_legacy_code(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<IngestResponse>> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation("every uploaded file needs a filename".into()))?;
        let contents = field.bytes().await?;
        files.push(UploadedFile::new(file_name, contents.to_vec()));
    }

    let ingested = state.sessions.ingest(files).await?;
    Ok(Json(IngestResponse {
        session_id: ingested.session_id.to_string(),
        files: ingested.files.iter().map(|p| display_path(p)).collect(),
    }))
}

// -------- Documentation --------

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// Session identifier returned by ingest
    pub session_id: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub session_id: String,
    pub status: String,
    pub summary: String,
}

/// Generate system and module-level documentation for a session
#[utoipa::path(
    post,
    path = "/docs/generate",
    tag = "documentation",
    params(SessionQuery),
    responses(
        (status = 200, description = "Documentation written to docs/summary.json", body = DocumentResponse),
        (status = 400, description = "Invalid session id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn generate_documentation(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<Json<DocumentResponse>> {
    let session_id = SessionId::parse(&query.session_id)?;
    let doc = state.documents.generate(&session_id).await?;
    Ok(Json(DocumentResponse {
        session_id: doc.session_id.to_string(),
        status: doc.status,
        summary: doc.summary,
    }))
}

#[derive(Deserialize, ToSchema)]
pub struct LlmDocumentationRequest {
    /// Legacy source snippet to document
    pub code: String,
    /// Source language label, e.g. "COBOL"
    pub language: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LlmDocumentationResponse {
    /// Model output, unmodified
    pub raw_response: String,
}

/// Document a code snippet with the configured language model
#[utoipa::path(
    post,
    path = "/docs/generate-llm",
    tag = "documentation",
    request_body = LlmDocumentationRequest,
    responses(
        (status = 200, description = "Raw model response", body = LlmDocumentationResponse),
        (status = 400, description = "Empty code"),
        (status = 502, description = "Language model call failed"),
        (status = 503, description = "No language model credential configured")
    )
)]
pub async fn generate_documentation_llm(
    State(state): State<AppState>,
    Json(request): Json<LlmDocumentationRequest>,
) -> ApiResult<Json<LlmDocumentationResponse>> {
    let synthesizer = state
        .synthesizer
        .as_ref()
        .ok_or(ApiError::Configuration)?;

    if request.code.trim().is_empty() {
        return Err(ApiError::Validation("code must not be empty".into()));
    }

    let raw_response = synthesizer
        .synthesize(&request.code, request.language.as_deref())
        .await
        .map_err(|e| ApiError::Upstream(format!("{:#}", e)))?;

    Ok(Json(LlmDocumentationResponse { raw_response }))
}

// -------- Evaluation --------

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CoverageDto {
    pub modules: f64,
    pub data_elements: f64,
    pub interfaces: f64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ModuleConfidenceDto {
    pub module: String,
    pub score: f64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ConfidenceDto {
    pub overall: f64,
    pub by_module: Vec<ModuleConfidenceDto>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HotspotDto {
    pub location: String,
    pub reason: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    pub session_id: String,
    pub coverage: CoverageDto,
    pub confidence: ConfidenceDto,
    pub hotspots: Vec<HotspotDto>,
}

impl From<EvaluationMetrics> for MetricsResponse {
    fn from(m: EvaluationMetrics) -> Self {
        Self {
            session_id: m.session_id.to_string(),
            coverage: CoverageDto {
                modules: m.coverage.modules,
                data_elements: m.coverage.data_elements,
                interfaces: m.coverage.interfaces,
            },
            confidence: ConfidenceDto {
                overall: m.confidence.overall,
                by_module: m
                    .confidence
                    .by_module
                    .into_iter()
                    .map(|c| ModuleConfidenceDto {
                        module: c.module,
                        score: c.score,
                    })
                    .collect(),
            },
            hotspots: m
                .hotspots
                .into_iter()
                .map(|h| HotspotDto {
                    location: h.location,
                    reason: h.reason,
                })
                .collect(),
        }
    }
}

/// Coverage and confidence metrics for a session's documentation
#[utoipa::path(
    get,
    path = "/evaluation/metrics",
    tag = "evaluation",
    params(SessionQuery),
    responses(
        (status = 200, description = "Metrics, also written to docs/metrics.json", body = MetricsResponse),
        (status = 400, description = "Invalid session id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_documentation_metrics(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<Json<MetricsResponse>> {
    let session_id = SessionId::parse(&query.session_id)?;
    let metrics = state.evaluation.report(&session_id).await?;
    Ok(Json(metrics.into()))
}

// -------- Code and test generation --------

fn default_target_lang() -> String {
    "java".to_string()
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct GenerateQuery {
    /// Session identifier returned by ingest
    pub session_id: String,
    /// Target language, "java" (default) or "python"
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl GenerateQuery {
    fn parse(&self) -> ApiResult<(SessionId, TargetLanguage)> {
        Ok((
            SessionId::parse(&self.session_id)?,
            TargetLanguage::parse(&self.target_lang)?,
        ))
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CodegenResponse {
    pub session_id: String,
    pub target_lang: String,
    pub status: String,
    pub artifact_location: String,
}

impl From<GeneratedArtifact> for CodegenResponse {
    fn from(a: GeneratedArtifact) -> Self {
        Self {
            session_id: a.session_id.to_string(),
            target_lang: a.target_lang.to_string(),
            status: a.status,
            artifact_location: display_path(&a.location),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TestgenResponse {
    pub session_id: String,
    pub target_lang: String,
    pub status: String,
    pub test_suite_location: String,
}

impl From<GeneratedArtifact> for TestgenResponse {
    fn from(a: GeneratedArtifact) -> Self {
        Self {
            session_id: a.session_id.to_string(),
            target_lang: a.target_lang.to_string(),
            status: a.status,
            test_suite_location: display_path(&a.location),
        }
    }
}

/// Generate target code (Java or Python) for a session
#[utoipa::path(
    post,
    path = "/codegen/generate",
    tag = "code-generation",
    params(GenerateQuery),
    responses(
        (status = 200, description = "Placeholder service written", body = CodegenResponse),
        (status = 400, description = "Invalid session id or target language"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn generate_target_code(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> ApiResult<Json<CodegenResponse>> {
    let (session_id, target_lang) = query.parse()?;
    let artifact = state.codegen.generate_code(&session_id, target_lang).await?;
    Ok(Json(artifact.into()))
}

/// Generate unit tests for a session's target code
#[utoipa::path(
    post,
    path = "/testgen/generate",
    tag = "test-generation",
    params(GenerateQuery),
    responses(
        (status = 200, description = "Placeholder test suite written", body = TestgenResponse),
        (status = 400, description = "Invalid session id or target language"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn generate_unit_tests(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> ApiResult<Json<TestgenResponse>> {
    let (session_id, target_lang) = query.parse()?;
    let artifact = state.codegen.generate_tests(&session_id, target_lang).await?;
    Ok(Json(artifact.into()))
}

// -------- Sessions --------

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SessionArtifactsResponse {
    pub session_id: String,
    /// Files relative to the session directory, e.g. "docs/summary.json"
    pub artifacts: Vec<String>,
}

/// List every artifact stored for a session
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/artifacts",
    tag = "sessions",
    params(("session_id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Artifact listing", body = SessionArtifactsResponse),
        (status = 400, description = "Invalid session id"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn list_session_artifacts(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionArtifactsResponse>> {
    let session_id = SessionId::parse(&session_id)?;
    let artifacts = state.store.list_artifacts(&session_id).await?;
    Ok(Json(SessionArtifactsResponse {
        session_id: session_id.to_string(),
        artifacts,
    }))
}
