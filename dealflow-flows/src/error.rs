//! Error types for the flow engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for flow operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors that can occur in flow operations
#[derive(Debug, Error)]
pub enum FlowError {
    /// Flow not initialized at the given path
    #[error("flow not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Flow already exists
    #[error("flow already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// Stage not found
    #[error("stage not found: {id}")]
    StageNotFound { id: String },

    /// Deal not found
    #[error("deal not found: {id}")]
    DealNotFound { id: String },

    /// No form layout stored for an entity type
    #[error("form layout not found for entity: {entity}")]
    LayoutNotFound { entity: String },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Lock is held by another process
    #[error("lock busy - another operation in progress")]
    LockBusy,

    /// Layout rearrangement error
    #[error(transparent)]
    Layout(#[from] dealflow_layout::LayoutError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlowError {
    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FlowError::StageNotFound {
            id: "proposal".into(),
        };
        assert_eq!(err.to_string(), "stage not found: proposal");
    }

    #[test]
    fn test_layout_error_passthrough() {
        let err: FlowError = dealflow_layout::LayoutError::FieldNotFound {
            id: "amount".into(),
        }
        .into();
        assert_eq!(err.to_string(), "field not found: amount");
    }

    #[test]
    fn test_retryable() {
        assert!(FlowError::LockBusy.is_retryable());
        assert!(!FlowError::DealNotFound { id: "x".into() }.is_retryable());
    }
}
