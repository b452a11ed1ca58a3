//! Validation helpers for `docket`.
//!
//! These routines enforce data constraints before a storage call and
//! return structured validation errors without mutating storage. The
//! storage layer remains authoritative for relational checks (row
//! existence, uniqueness); everything here is shape-only.

use crate::error::ValidationError;
use crate::storage::{IssueUpdate, NewIssue};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Validates issue fields on creation.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a new issue and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(new: &NewIssue) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Title: required, max 500 chars.
        if new.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "cannot be empty"));
        }
        if new.title.len() > 500 {
            errors.push(ValidationError::new("title", "exceeds 500 characters"));
        }

        // Description: optional, max 100KB.
        if let Some(description) = new.description.as_ref() {
            if description.len() > 102_400 {
                errors.push(ValidationError::new("description", "exceeds 100KB"));
            }
        }

        if new.status.as_str().trim().is_empty() {
            errors.push(ValidationError::new("status", "cannot be blank"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate the fields present in an update patch.
    ///
    /// Absent fields are not checked; `Some(None)` clears are always
    /// acceptable for the nullable columns.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any present field is invalid.
    pub fn validate_update(updates: &IssueUpdate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(title) = updates.title.as_ref() {
            if title.trim().is_empty() {
                errors.push(ValidationError::new("title", "cannot be empty"));
            }
            if title.len() > 500 {
                errors.push(ValidationError::new("title", "exceeds 500 characters"));
            }
        }

        if let Some(Some(description)) = updates.description.as_ref() {
            if description.len() > 102_400 {
                errors.push(ValidationError::new("description", "exceeds 100KB"));
            }
        }

        if let Some(status) = updates.status.as_ref() {
            if status.as_str().trim().is_empty() {
                errors.push(ValidationError::new("status", "cannot be blank"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Validates a single label value.
pub struct LabelValidator;

impl LabelValidator {
    /// Validate a label for length and allowed characters.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the label is invalid.
    pub fn validate(label: &str) -> Result<(), ValidationError> {
        if label.is_empty() {
            return Err(ValidationError::new("label", "cannot be empty"));
        }

        if label.len() > 50 {
            return Err(ValidationError::new("label", "exceeds 50 characters"));
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
        {
            return Err(ValidationError::new(
                "label",
                "invalid characters (only alphanumeric, hyphen, underscore, colon allowed)",
            ));
        }

        Ok(())
    }

    /// Validate a full label set, collecting every failure.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any label is invalid.
    pub fn validate_all(labels: &[String]) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = labels
            .iter()
            .filter_map(|label| Self::validate(label).err())
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Validates user fields.
pub struct UserValidator;

impl UserValidator {
    /// Validate a user's name and email.
    ///
    /// The email check is syntactic only; uniqueness is enforced by the
    /// storage layer.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(name: &str, email: &str) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if name.trim().is_empty() {
            errors.push(ValidationError::new("name", "cannot be empty"));
        }
        if name.len() > 200 {
            errors.push(ValidationError::new("name", "exceeds 200 characters"));
        }

        if !EMAIL_RE.is_match(email) {
            errors.push(ValidationError::new("email", "is not a valid address"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
