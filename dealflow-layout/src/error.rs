//! Error types for layout operations

use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur when rearranging a layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A move referenced an index outside the field sequence
    #[error("index {index} out of range for layout of {len} fields")]
    IndexOutOfRange { index: usize, len: usize },

    /// A width change referenced a field id not present in the sequence
    #[error("field not found: {id}")]
    FieldNotFound { id: String },
}
