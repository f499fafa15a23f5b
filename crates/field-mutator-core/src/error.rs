//! Error types for field mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// These codes form a **stable API contract**: once published, variant names
/// and their serialized `snake_case` strings must never change across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// The document is not valid JSON, or re-serialization failed.
    JsonParseError,
    /// The field address is malformed or does not resolve in the document.
    InvalidPath,
    /// A strategy that needs a payload was processed without one.
    MissingPayload,
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("{strategy} strategy has no payload to apply")]
    MissingPayload { strategy: &'static str },
}

impl MutationError {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        MutationError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code for this error variant.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            MutationError::JsonError(_) => ErrorCode::JsonParseError,
            MutationError::InvalidPath { .. } => ErrorCode::InvalidPath,
            MutationError::MissingPayload { .. } => ErrorCode::MissingPayload,
        }
    }

    /// Returns the field address involved, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            MutationError::InvalidPath { path, .. } => Some(path),
            MutationError::JsonError(_) | MutationError::MissingPayload { .. } => None,
        }
    }

    /// Produces a structured JSON error.
    ///
    /// Format: `{"code": "...", "message": "...", "path": "..." | null}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
            "path": self.path(),
        })
    }
}
