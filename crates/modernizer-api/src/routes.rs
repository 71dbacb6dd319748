use crate::{
    handlers::{self, DOCS_UI_PATH, OPENAPI_JSON_PATH},
    rest::{self, ApiDoc},
    AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.settings.server.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Ingestion
        .route(
            "/ingest/legacy-code",
            post(rest::handlers::ingest_legacy_code),
        )
        // Documentation
        .route("/docs/generate", post(rest::handlers::generate_documentation))
        .route(
            "/docs/generate-llm",
            post(rest::handlers::generate_documentation_llm),
        )
        // Evaluation
        .route(
            "/evaluation/metrics",
            get(rest::handlers::get_documentation_metrics),
        )
        // Generation
        .route("/codegen/generate", post(rest::handlers::generate_target_code))
        .route("/testgen/generate", post(rest::handlers::generate_unit_tests))
        // Sessions
        .route(
            "/sessions/{session_id}/artifacts",
            get(rest::handlers::list_session_artifacts),
        )
        .with_state(state)
        .merge(SwaggerUi::new(DOCS_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
