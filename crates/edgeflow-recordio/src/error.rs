//! Error types for record readers and writers.

use edgeflow_model::{FieldError, FieldType};
use thiserror::Error;

/// Errors crossing the byte-stream boundary.
///
/// Stream failures propagate verbatim from the underlying source or sink;
/// clean end-of-stream is never an error (readers return `Ok(None)`). Type
/// mismatches are fatal to the single record being written and name the
/// offending field and kind so the pipeline can build an error record.
#[derive(Debug, Error)]
pub enum RecordIoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Field(#[from] FieldError),

    /// A field exists at the expected location but has the wrong kind.
    #[error("invalid field type for '{field}': expected {expected}, found {actual}")]
    InvalidFieldType {
        field: String,
        expected: FieldType,
        actual: FieldType,
    },

    /// A field the format requires is absent.
    #[error("field not found: {field}")]
    FieldNotFound { field: String },

    /// The record's root value has a shape the format cannot serialize.
    #[error("unsupported root field type: {actual}")]
    UnsupportedRootType { actual: FieldType },
}

pub type Result<T> = std::result::Result<T, RecordIoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_field_and_types() {
        let err = RecordIoError::InvalidFieldType {
            field: "text".to_string(),
            expected: FieldType::String,
            actual: FieldType::Long,
        };
        assert_eq!(
            err.to_string(),
            "invalid field type for 'text': expected STRING, found LONG"
        );
    }
}
