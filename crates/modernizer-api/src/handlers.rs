use crate::AppState;
use axum::{extract::State, response::Redirect, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DOCS_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether LLM-assisted documentation is available
    pub llm_configured: bool,
}

/// Liveness and feature status
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_configured: state.llm_configured(),
    })
}

/// `GET /` sends browsers to the interactive API docs.
pub async fn root() -> Redirect {
    Redirect::temporary(DOCS_UI_PATH)
}
