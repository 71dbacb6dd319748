//! Identifiers and path segments that flow from requests into the artifact store.
//!
//! Everything in here ends up as a directory or file name below the output
//! root, so construction always goes through a validating parser.

use crate::error::{ModernizerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

const MAX_SESSION_ID_LEN: usize = 128;
const MAX_FILE_NAME_LEN: usize = 255;
const MAX_TARGET_LANG_LEN: usize = 32;

/// Name prefix of in-flight store writes; reserved, never a valid upload name.
pub(crate) const STAGING_PREFIX: &str = ".staging-";

/// Opaque token naming a session directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Fresh 128-bit random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ModernizerError::invalid("session id", raw, "must not be empty"));
        }
        if raw.len() > MAX_SESSION_ID_LEN {
            return Err(ModernizerError::invalid("session id", raw, "too long"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ModernizerError::invalid(
                "session id",
                raw,
                "only ASCII letters, digits, '-' and '_' are allowed",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SessionId {
    type Error = ModernizerError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

/// Checks a client-supplied file name for use as a single path component.
/// Names carrying directory parts are rejected instead of being stripped.
pub fn validate_file_name(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(ModernizerError::invalid("file name", raw, "must not be empty"));
    }
    if raw.len() > MAX_FILE_NAME_LEN {
        return Err(ModernizerError::invalid("file name", raw, "too long"));
    }
    if raw == "." || raw == ".." {
        return Err(ModernizerError::invalid(
            "file name",
            raw,
            "relative directory names are not allowed",
        ));
    }
    if raw.contains(['/', '\\']) {
        return Err(ModernizerError::invalid(
            "file name",
            raw,
            "path separators are not allowed",
        ));
    }
    if raw.chars().any(char::is_control) {
        return Err(ModernizerError::invalid(
            "file name",
            raw,
            "control characters are not allowed",
        ));
    }
    if raw.starts_with(STAGING_PREFIX) {
        return Err(ModernizerError::invalid(
            "file name",
            raw,
            "the .staging- prefix is reserved",
        ));
    }
    Ok(raw)
}

/// Modern language selected for generated code and tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    Java,
    Python,
    /// Any other well-formed name; rendered with the generic template.
    Other(String),
}

impl TargetLanguage {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ModernizerError::invalid(
                "target language",
                raw,
                "must not be empty",
            ));
        }
        if raw.len() > MAX_TARGET_LANG_LEN {
            return Err(ModernizerError::invalid("target language", raw, "too long"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        {
            return Err(ModernizerError::invalid(
                "target language",
                raw,
                "only ASCII letters, digits, '-', '_' and '+' are allowed",
            ));
        }

        Ok(match raw.to_ascii_lowercase().as_str() {
            "java" => Self::Java,
            "python" => Self::Python,
            other => Self::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
            Self::Other(name) => name,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "py",
            Self::Other(_) => "txt",
        }
    }

    pub fn line_comment(&self) -> &'static str {
        match self {
            Self::Java => "//",
            Self::Python | Self::Other(_) => "#",
        }
    }
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::Java
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed sub-trees of a session directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactArea {
    Input,
    Docs,
    Code(TargetLanguage),
    Tests(TargetLanguage),
}

impl ArtifactArea {
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Self::Input => PathBuf::from("input"),
            Self::Docs => PathBuf::from("docs"),
            Self::Code(lang) => PathBuf::from("code").join(lang.as_str()),
            Self::Tests(lang) => PathBuf::from("tests").join(lang.as_str()),
        }
    }
}
