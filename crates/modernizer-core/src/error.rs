use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModernizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid {kind} '{value}': {reason}")]
    InvalidSegment {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ModernizerError {
    pub(crate) fn invalid(kind: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidSegment {
            kind,
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, ModernizerError>;
