//! Error types for the record data model.

use thiserror::Error;

/// Errors raised while parsing a textual field-path expression.
///
/// These are always fatal to the single call that supplied the expression;
/// a syntactically valid path that merely fails to resolve is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    /// A `[` with no matching `]`.
    #[error("unmatched bracket in '{expr}' at position {pos}")]
    UnmatchedBracket { expr: String, pos: usize },

    /// A list index that is empty or not a non-negative integer.
    #[error("invalid list index '{token}' in '{expr}'")]
    InvalidIndex { expr: String, token: String },

    /// A `/` step with no key name.
    #[error("empty field name in '{expr}' at position {pos}")]
    EmptyName { expr: String, pos: usize },

    /// A character where a `/` or `[` step was expected.
    #[error("unexpected character '{found}' in '{expr}' at position {pos}")]
    UnexpectedCharacter {
        expr: String,
        pos: usize,
        found: char,
    },
}

/// Errors raised while constructing or mutating field trees.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The field factory was handed a value kind outside the field
    /// vocabulary.
    #[error("unsupported value type: {kind}")]
    UnsupportedType { kind: String },

    /// A path-addressed set found no container to write into.
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    #[error(transparent)]
    Path(#[from] PathParseError),
}

pub type Result<T> = std::result::Result<T, FieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_input() {
        let err = FieldError::UnsupportedType {
            kind: "null".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported value type: null");

        let err = PathParseError::InvalidIndex {
            expr: "/a[x]".to_string(),
            token: "x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid list index 'x' in '/a[x]'");
    }
}
