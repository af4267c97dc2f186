//! Validation errors for console input

use thiserror::Error;

/// Result alias for validation in this crate
pub type TypesResult<T> = Result<T, TypesError>;

/// Errors raised while validating data entered by the admin
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// A required field was left empty
    #[error("{field} is required")]
    MissingField {
        /// Name of the empty field
        field: &'static str,
    },

    /// A field holds a value the backend would reject
    #[error("Invalid {field}: {message}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// A filter name that is not one of the known filters
    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),
}

impl TypesError {
    /// Name of the field this error is about, if any
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => Some(field),
            Self::UnknownFilter(_) => None,
        }
    }
}
