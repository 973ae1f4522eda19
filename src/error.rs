//! Error taxonomy for the posting pipeline and its classification into API errors.
//!
//! Collaborators produce typed errors (`DirectoryError`, `SourceError`), the
//! validator produces `ValidationErrors`, and the pipeline folds them into
//! `PostingError`. `ApiError::classify` turns a `PostingError` into the
//! structured response shape by matching on the variant, never on message text.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

/// Result type alias for the posting pipeline.
pub type Result<T> = std::result::Result<T, PostingError>;

// ============================================================================
// Validation
// ============================================================================

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one piece of input, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} invalid field(s): {}", .0.len(), join_violations(.0))]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldViolation::new(field, message)])
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected violations.
    pub fn into_result<T>(self, value: T) -> std::result::Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Collaborator errors
// ============================================================================

/// Failures reported by the company directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// One or more requested ids are unknown. Ids are sorted and unique.
    #[error("companies not found: {}", .0.join(", "))]
    NotFound(Vec<String>),
}

/// Failures reported by the posting source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("posting API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("posting API responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("posting API returned an unreadable payload: {0}")]
    Decode(String),
}

// ============================================================================
// Pipeline error
// ============================================================================

/// Everything the query and creation flows can fail with.
#[derive(Debug, Error)]
pub enum PostingError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("company not found: {}", .0.join(", "))]
    CompanyNotFound(Vec<String>),

    #[error("upstream: {0}")]
    Upstream(#[from] SourceError),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DirectoryError> for PostingError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(ids) => Self::CompanyNotFound(ids),
        }
    }
}

impl PostingError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::CompanyNotFound(_) => 404,
            Self::Upstream(_) => 500,
            Self::Internal(_) => 500,
        }
    }
}

// ============================================================================
// API error
// ============================================================================

/// Which operation failed; selects the wording of the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Query,
    Create,
}

/// Structured error returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>, details: Option<JsonValue>) -> Self {
        Self {
            status_code,
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Option<JsonValue>) -> Self {
        Self::new(400, message, details)
    }

    pub fn not_found(message: impl Into<String>, details: Option<JsonValue>) -> Self {
        Self::new(404, message, details)
    }

    pub fn internal(message: impl Into<String>, details: Option<JsonValue>) -> Self {
        Self::new(500, message, details)
    }

    /// Map a pipeline failure to the client-facing error for `operation`.
    pub fn classify(operation: Operation, err: &PostingError) -> Self {
        match err {
            PostingError::Validation(errors) => {
                let message = match operation {
                    Operation::Query => "Invalid request parameters",
                    Operation::Create => "Invalid request data",
                };
                Self::bad_request(message, Some(json!(errors.violations())))
            }
            PostingError::CompanyNotFound(ids) => {
                let message = match operation {
                    Operation::Query => "Company not found",
                    Operation::Create => "Cannot create posting: Company not found",
                };
                Self::not_found(message, Some(json!({ "missingCompanyIds": ids })))
            }
            PostingError::Upstream(source) => {
                let message = match operation {
                    Operation::Query => "Failed to fetch postings",
                    Operation::Create => "Failed to create posting",
                };
                Self::internal(message, Some(json!({ "reason": source.to_string() })))
            }
            PostingError::Internal(e) => Self::internal(
                "Internal server error",
                Some(json!({ "reason": e.to_string() })),
            ),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(feature = "server")]
mod into_response {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use serde_json::json;

    use super::ApiError;

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status =
                StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({ "error": self }))).into_response()
        }
    }
}
