use serde::{Deserialize, Serialize};

use crate::errors::{LsError, LsErrorKind, Result};

/// One inbound operation request
///
/// `resource_id` is optional on the wire; `resource_or_default` resolves it
/// against the configured well-known name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// The statement to run against the resource's working copy
    pub statement: String,

    /// Resource to operate on; defaults to the configured name when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl OperationRequest {
    /// Create a request against the default resource
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            resource_id: None,
        }
    }

    /// Create a request against a named resource
    pub fn for_resource(statement: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            resource_id: Some(resource_id.into()),
        }
    }

    /// Resolve the effective resource name
    pub fn resource_or_default<'a>(&'a self, default_resource: &'a str) -> &'a str {
        self.resource_id.as_deref().unwrap_or(default_resource)
    }

    /// Validate the request fields
    ///
    /// The statement must be non-empty after trimming. A present
    /// `resource_id` must be a bare object name: it is used verbatim as a
    /// store key, so path separators and the dot directories are rejected.
    ///
    /// # Errors
    ///
    /// Returns `LsErrorKind::Validation` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.statement.trim().is_empty() {
            return Err(LsError::new(LsErrorKind::Validation)
                .with_op("validate_request")
                .with_message("statement must not be empty"));
        }
        if let Some(resource_id) = &self.resource_id {
            validate_resource_name(resource_id)?;
        }
        Ok(())
    }
}

/// Validate a resource name for use as a store key
///
/// # Errors
///
/// Returns `LsErrorKind::Validation` if the name is empty, contains a path
/// separator, or is `.` or `..`.
pub fn validate_resource_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LsError::new(LsErrorKind::Validation)
            .with_op("validate_request")
            .with_message("resource_id must not be empty"));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(LsError::new(LsErrorKind::Validation)
            .with_op("validate_request")
            .with_resource_id(name)
            .with_message("resource_id must be a bare object name"));
    }
    Ok(())
}
