use axum::{
    extract::multipart::MultipartError,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use modernizer_core::ModernizerError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] ModernizerError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed upload: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    #[error("LLM provider is not configured: set {}", modernizer_core::LLM_API_KEY_ENV)]
    Configuration,

    #[error("LLM call failed: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err {
                ModernizerError::InvalidSegment { .. } => StatusCode::BAD_REQUEST,
                ModernizerError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Multipart(err) => err.status(),
            ApiError::Configuration => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let invalid = ModernizerError::InvalidSegment {
            kind: "file name",
            value: "../x".into(),
            reason: "path separators are not allowed",
        };
        assert_eq!(ApiError::from(invalid).status(), StatusCode::BAD_REQUEST);

        let io = ModernizerError::Io(std::io::Error::other("disk full"));
        assert_eq!(
            ApiError::from(io).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        assert_eq!(
            ApiError::Configuration.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Upstream("timeout".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn configuration_message_names_the_variable() {
        assert_eq!(
            ApiError::Configuration.to_string(),
            "LLM provider is not configured: set OPENAI_API_KEY"
        );
    }
}
