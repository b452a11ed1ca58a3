//! Structured error output for machine consumers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Retryability flags
//! - Context for debugging

use crate::error::DocketError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
/// Format: `SCREAMING_SNAKE_CASE` for easy parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Database Errors (exit code 2) ===
    /// Database file not found
    DatabaseNotFound,
    /// Database operation failed
    DatabaseError,
    /// Docket workspace not initialized
    NotInitialized,
    /// Already initialized
    AlreadyInitialized,

    // === Lookup Errors (exit code 3) ===
    /// Issue with specified ID not found
    IssueNotFound,

    // === Validation Errors (exit code 4) ===
    /// Field validation failed
    ValidationFailed,
    /// Comment author does not exist
    InvalidAuthor,

    // === Concurrency Errors (exit code 5) ===
    /// Optimistic version token is stale
    VersionConflict,

    // === Transactional Errors (exit code 6) ===
    /// Label replacement rolled back
    ReplaceFailed,
    /// Bulk update rolled back due to missing ids
    PartialFailure,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// YAML parsing error
    YamlError,

    // === Internal Errors (exit code 1) ===
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Database
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            // Lookup
            Self::IssueNotFound => "ISSUE_NOT_FOUND",
            // Validation
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidAuthor => "INVALID_AUTHOR",
            // Concurrency
            Self::VersionConflict => "VERSION_CONFLICT",
            // Transactional
            Self::ReplaceFailed => "REPLACE_FAILED",
            Self::PartialFailure => "PARTIAL_FAILURE",
            // Config
            Self::ConfigError => "CONFIG_ERROR",
            // I/O
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::YamlError => "YAML_ERROR",
            // Internal
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is potentially retryable.
    ///
    /// Retryable means the caller might succeed after correcting its input:
    /// re-reading the current version, removing missing ids from a bulk
    /// request, or fixing a rejected field.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::VersionConflict
                | Self::ValidationFailed
                | Self::InvalidAuthor
                | Self::PartialFailure
        )
    }

    /// Get the exit code for this error category.
    ///
    /// Exit codes are grouped by error category:
    /// - 1: Internal/unknown errors
    /// - 2: Database errors
    /// - 3: Lookup errors
    /// - 4: Validation errors
    /// - 5: Concurrency errors
    /// - 6: Transactional errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            // Database (2)
            Self::DatabaseNotFound
            | Self::DatabaseError
            | Self::NotInitialized
            | Self::AlreadyInitialized => 2,
            // Lookup (3)
            Self::IssueNotFound => 3,
            // Validation (4)
            Self::ValidationFailed | Self::InvalidAuthor => 4,
            // Concurrency (5)
            Self::VersionConflict => 5,
            // Transactional (6)
            Self::ReplaceFailed | Self::PartialFailure => 6,
            // Config (7)
            Self::ConfigError => 7,
            // I/O (8)
            Self::IoError | Self::JsonError | Self::YamlError => 8,
            // Internal (1)
            Self::InternalError => 1,
        }
    }
}

/// Structured error for machine-parseable output.
///
/// Provides callers with:
/// - Machine-readable error code
/// - Human-readable message
/// - Context-aware hint for self-correction
/// - Retryability flag
/// - Structured context data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether the operation can be retried
    pub retryable: bool,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `DocketError`.
    #[must_use]
    pub fn from_error(err: &DocketError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            retryable: code.is_retryable(),
            context,
        }
    }

    /// Create a structured error for a missing workspace.
    #[must_use]
    pub fn not_initialized() -> Self {
        Self {
            code: ErrorCode::NotInitialized,
            message: "Docket not initialized: run 'dk init' first".to_string(),
            hint: Some("Run: dk init".to_string()),
            retryable: false,
            context: None,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            // Red for error
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                // Yellow for hint
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    /// Extract error code and context from a `DocketError`.
    fn extract_code_and_context(err: &DocketError) -> (ErrorCode, Option<Value>) {
        match err {
            DocketError::DatabaseNotFound { path } => (
                ErrorCode::DatabaseNotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            DocketError::Database(_) => (ErrorCode::DatabaseError, None),
            DocketError::NotInitialized => (ErrorCode::NotInitialized, None),
            DocketError::AlreadyInitialized { path } => (
                ErrorCode::AlreadyInitialized,
                Some(json!({"path": path.display().to_string()})),
            ),
            DocketError::IssueNotFound { id } => {
                (ErrorCode::IssueNotFound, Some(json!({"searched_id": id})))
            }
            DocketError::VersionConflict {
                id,
                expected,
                actual,
            } => (
                ErrorCode::VersionConflict,
                Some(json!({
                    "issue_id": id,
                    "expected_version": expected,
                    "actual_version": actual,
                })),
            ),
            DocketError::Validation { field, reason } => (
                ErrorCode::ValidationFailed,
                Some(json!({"field": field, "reason": reason})),
            ),
            DocketError::ValidationErrors { errors } => (
                ErrorCode::ValidationFailed,
                Some(json!({
                    "errors": errors.iter()
                        .map(|e| json!({"field": e.field, "message": e.message}))
                        .collect::<Vec<_>>()
                })),
            ),
            DocketError::InvalidAuthor { id } => {
                (ErrorCode::InvalidAuthor, Some(json!({"author_id": id})))
            }
            DocketError::ReplaceFailed { id, source } => (
                ErrorCode::ReplaceFailed,
                Some(json!({
                    "issue_id": id,
                    "cause": source.to_string(),
                })),
            ),
            DocketError::PartialFailure { failed_ids } => (
                ErrorCode::PartialFailure,
                Some(json!({
                    "failed_ids": failed_ids,
                    "missing_count": failed_ids.len(),
                })),
            ),
            DocketError::Config(_) => (ErrorCode::ConfigError, None),
            DocketError::Io(_) => (ErrorCode::IoError, None),
            DocketError::Json(_) => (ErrorCode::JsonError, None),
            DocketError::Yaml(_) => (ErrorCode::YamlError, None),
            DocketError::Other(_) => (ErrorCode::InternalError, None),
        }
    }

    /// Generate a context-aware hint from an error.
    fn generate_hint(err: &DocketError) -> Option<String> {
        // Built-in suggestions cover most variants
        if let Some(suggestion) = err.suggestion() {
            return Some(suggestion.to_string());
        }

        match err {
            DocketError::IssueNotFound { .. } => {
                Some("Run 'dk list' to see available issues.".to_string())
            }
            DocketError::ReplaceFailed { .. } => Some(
                "The previous label set was preserved; fix the cause and retry.".to_string(),
            ),
            _ => None,
        }
    }
}
