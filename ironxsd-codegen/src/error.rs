//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] ironxsd_schema::ParseError),

    /// Type resolution error.
    #[error("schema error: {0}")]
    Schema(#[from] ironxsd_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}

impl From<tempfile::PersistError> for CodegenError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_display() {
        let err = CodegenError::generation("empty output directory");
        assert_eq!(err.to_string(), "generation error: empty output directory");
    }

    #[test]
    fn test_schema_error_converts() {
        let err: CodegenError = ironxsd_schema::SchemaError::circular(&["A", "B", "A"]).into();
        assert!(matches!(err, CodegenError::Schema(_)));
        assert!(err.to_string().contains("A -> B -> A"));
    }
}
