//! DTOs for customer endpoints

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating or updating a customer
///
/// Every field is optional at the JSON level; missing values are reported by
/// request validation with a per-field message instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CustomerRequest {
    /// Customer name: 2-100 letters or spaces, unique
    #[schema(example = "Maria Lopez")]
    #[serde(default)]
    pub nombre: Option<String>,

    /// Contact email
    #[schema(example = "maria.lopez@example.com")]
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone, at most 15 characters
    #[schema(example = "0987654321")]
    #[serde(default)]
    pub telefono: Option<String>,
}

/// Customer as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    /// Storage-assigned identifier
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "Maria Lopez")]
    pub nombre: String,
    #[schema(example = "maria.lopez@example.com")]
    pub email: Option<String>,
    #[schema(example = "0987654321")]
    pub telefono: Option<String>,
    /// When the customer was first stored
    pub fecha_registro: Option<DateTime<Utc>>,
    /// `false` once the customer has been deleted
    #[schema(example = true)]
    pub activo: bool,
}

/// Query string for lookups by name
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Exact customer name
    pub nombre: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    /// HTTP status code
    #[schema(example = 404)]
    pub status: u16,
    /// HTTP reason phrase
    #[schema(example = "Not Found")]
    pub error: String,
    #[schema(example = "Cliente no encontrado con id: 7")]
    pub message: String,
    /// Request path that failed
    #[schema(example = "/api/v1/clientes/7")]
    pub path: String,
    /// Field name to message, only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
}
