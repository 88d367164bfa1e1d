//! Domain errors for customer operations
//!
//! Infrastructure errors never leak past the storage adapters; they arrive
//! here already converted to one of these variants.

use thiserror::Error;

/// Errors that can occur while managing customers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// No customer matches the given key
    #[error("Cliente no encontrado con {field}: {value}")]
    NotFound { field: &'static str, value: String },

    /// A uniqueness rule would be violated
    #[error("Ya existe un cliente con el {field}: {value}")]
    AlreadyExists { field: &'static str, value: String },

    /// Caller input the service cannot act on
    #[error("{0}")]
    IllegalArgument(String),

    /// The storage backend failed
    #[error("Storage operation failed: {0}")]
    StorageFailure(String),

    /// An unexpected internal error occurred
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CustomerError {
    /// No customer with this id
    pub fn not_found_by_id(id: impl ToString) -> Self {
        Self::NotFound {
            field: "id",
            value: id.to_string(),
        }
    }

    /// No customer with this name
    pub fn not_found_by_name(name: impl Into<String>) -> Self {
        Self::NotFound {
            field: "nombre",
            value: name.into(),
        }
    }

    /// Another customer already holds this name
    pub fn name_taken(name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            field: "nombre",
            value: name.into(),
        }
    }

    /// Another customer already holds this email
    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::AlreadyExists {
            field: "email",
            value: email.into(),
        }
    }

    pub fn illegal_argument(msg: impl Into<String>) -> Self {
        Self::IllegalArgument(msg.into())
    }

    pub fn storage_failure(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}

/// Result type alias for customer operations
pub type Result<T> = std::result::Result<T, CustomerError>;
