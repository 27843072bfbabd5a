//! Error types for form operations.

use thiserror::Error;

/// Errors from addressing a form's fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("form '{form}' has no field '{id}'")]
    UnknownField { form: String, id: String },
}

pub type Result<T> = std::result::Result<T, FormError>;
