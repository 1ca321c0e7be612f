//! Field access error types

/// Error accessing a field on a dynamic record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FieldError {
    /// The field does not exist on the record.
    #[error("Field '{0}' is missing")]
    Missing(String),

    /// The field exists but holds a different type than requested.
    #[error("Field '{field}' is {actual}, expected {expected}")]
    TypeMismatch {
        /// The field that was accessed.
        field: String,
        /// The type the caller asked for.
        expected: &'static str,
        /// The type actually stored.
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a missing-field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a type-mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}
