//! HTTP error translation
//!
//! Every failure kind maps to one status code and the shared error body. The
//! service never picks status codes; this module is the only place that does.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use clientes_domain::CustomerError;
use thiserror::Error;
use tracing::error;

use crate::{dto::customer::ErrorResponse, validation::ValidationErrors};

const VALIDATION_MESSAGE: &str = "Error de validación en los datos proporcionados";
const INTERNAL_MESSAGE: &str = "Ha ocurrido un error interno en el servidor";

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Error de validación en los datos proporcionados")]
    Validation(ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    /// Detail is logged, never sent to the caller
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label placed in the `error` field of the body
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Not Found",
            Self::Conflict(_) => "Conflict",
            Self::Validation(_) => "Validation Error",
            Self::BadRequest(_) => "Bad Request",
            Self::Internal(_) => "Internal Server Error",
        }
    }

    /// Build the error body for a request to `path`
    pub fn to_body(&self, path: &str) -> ErrorResponse {
        let (message, validation_errors) = match self {
            Self::Validation(errors) => (VALIDATION_MESSAGE.to_string(), Some(errors.clone())),
            Self::Internal(_) => (INTERNAL_MESSAGE.to_string(), None),
            other => (other.to_string(), None),
        };

        ErrorResponse {
            timestamp: Utc::now(),
            status: self.status_code().as_u16(),
            error: self.label().to_string(),
            message,
            path: path.to_string(),
            validation_errors,
        }
    }

    /// Log the failure and render it as a response for `path`
    pub fn into_response_at(self, path: &str) -> Response {
        match &self {
            Self::Internal(detail) => error!(%path, %detail, "Internal server error"),
            other => error!(%path, error = %other, kind = other.label(), "Request failed"),
        }

        (self.status_code(), Json(self.to_body(path))).into_response()
    }
}

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound { .. } => Self::NotFound(err.to_string()),
            CustomerError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
            CustomerError::IllegalArgument(msg) => Self::BadRequest(msg),
            CustomerError::StorageFailure(_) | CustomerError::InternalError(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(format!("Cuerpo de la petición inválido: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Identificador inválido: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Parámetros de búsqueda inválidos: {}", rejection.body_text()))
    }
}
