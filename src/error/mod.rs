//! Error types and handling for `docket`.
//!
//! The variant set is the operation taxonomy: lookup failures, the
//! optimistic-concurrency conflict, input validation, the two
//! transactional-abort kinds, and wrapped infrastructure errors.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Supports `anyhow` integration for wrapped one-off errors
//! - Provides recovery hints for user-facing errors
//! - Provides structured JSON output with stable machine codes

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `docket` operations.
#[derive(Error, Debug)]
pub enum DocketError {
    // === Storage Errors ===
    /// Database file not found at the specified path.
    #[error("Database not found at '{path}'")]
    DatabaseNotFound { path: PathBuf },

    /// `SQLite` database error. Mutations roll back before this surfaces.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // === Lookup Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: i64 },

    // === Optimistic Concurrency ===
    /// The caller's expected version no longer matches the stored row.
    #[error("Version conflict on issue {id}: expected {expected}, found {actual}")]
    VersionConflict { id: i64, expected: i64, actual: i64 },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Comment author does not reference an existing user.
    #[error("Comment author not found: user {id}")]
    InvalidAuthor { id: i64 },

    // === Transactional Errors ===
    /// Label replacement transaction aborted; the prior label set is intact.
    #[error("Label replace failed for issue {id}: {source}")]
    ReplaceFailed {
        id: i64,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Bulk status update rolled back because some ids were missing.
    /// Nothing was persisted, including the updates that succeeded.
    #[error("Bulk update rolled back: missing issues {failed_ids:?}")]
    PartialFailure { failed_ids: Vec<i64> },

    // === Configuration Errors ===
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Docket workspace not initialized.
    #[error("Docket not initialized: run 'dk init' first")]
    NotInitialized,

    /// Already initialized.
    #[error("Already initialized at '{path}'")]
    AlreadyInitialized { path: PathBuf },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped anyhow error for one-off failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single field validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// The reason for the validation failure.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl DocketError {
    /// Can the user fix this without code changes?
    #[must_use]
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DatabaseNotFound { .. }
                | Self::NotInitialized
                | Self::IssueNotFound { .. }
                | Self::VersionConflict { .. }
                | Self::Validation { .. }
                | Self::ValidationErrors { .. }
                | Self::InvalidAuthor { .. }
                | Self::PartialFailure { .. }
        )
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run: dk init"),
            Self::DatabaseNotFound { .. } => Some("Check path or run: dk init"),
            Self::AlreadyInitialized { .. } => Some("Use --force to reinitialize"),
            Self::VersionConflict { .. } => {
                Some("Re-read the issue and retry with its current version")
            }
            Self::PartialFailure { .. } => {
                Some("Remove the missing ids from the request and resubmit")
            }
            Self::InvalidAuthor { .. } => Some("Run 'dk user list' to see registered users"),
            _ => None,
        }
    }

    /// Create a validation error for a specific field.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create from multiple validation errors.
    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// Wrap a transactional failure as a label-replace abort for `id`.
    ///
    /// `VersionConflict` and `NotFound` style errors are never wrapped here;
    /// replace-label failures other than the precondition check all funnel
    /// through this constructor.
    #[must_use]
    pub fn replace_failed(id: i64, source: Self) -> Self {
        Self::ReplaceFailed {
            id,
            source: Box::new(source),
        }
    }
}

/// Result type using `DocketError`.
pub type Result<T> = std::result::Result<T, DocketError>;
