//! Customer handlers
//!
//! Thin adapters: parse, validate, call the service, map the result. Every
//! business decision is left to `CustomerService`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use clientes_domain::CustomerId;
use tracing::info;

use crate::{
    dto::customer::{CustomerRequest, CustomerResponse, ErrorResponse, SearchParams},
    error::ApiError,
    mapper,
    validation::validate_customer,
    AppState,
};

fn customer_id(id: Result<Path<i64>, PathRejection>) -> Result<CustomerId, ApiError> {
    let Path(raw) = id?;
    Ok(CustomerId::new(raw))
}

fn valid_request(
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<CustomerRequest, ApiError> {
    let Json(request) = payload?;
    validate_customer(&request).map_err(ApiError::Validation)?;
    Ok(request)
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/api/v1/clientes",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 409, description = "A customer with this name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "clientes"
)]
pub async fn create_customer_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result = async {
        let request = valid_request(payload)?;
        info!(nombre = ?request.nombre, "POST /api/v1/clientes - create customer");

        let created = state
            .customer_service
            .create(mapper::request_to_entity(request))
            .await?;
        Ok::<_, ApiError>(created)
    }
    .await;

    match result {
        Ok(created) => {
            info!(id = ?created.id(), "Customer created");
            (StatusCode::CREATED, Json(mapper::entity_to_response(created))).into_response()
        }
        Err(err) => err.into_response_at(uri.path()),
    }
}

/// Get a customer by id, whether active or not
#[utoipa::path(
    get,
    path = "/api/v1/clientes/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "clientes"
)]
pub async fn get_customer_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let result = async {
        let id = customer_id(id)?;
        info!(%id, "GET /api/v1/clientes/{{id}} - get customer");

        Ok::<_, ApiError>(state.customer_service.get_by_id(id).await?)
    }
    .await;

    match result {
        Ok(customer) => Json(mapper::entity_to_response(customer)).into_response(),
        Err(err) => err.into_response_at(uri.path()),
    }
}

/// Find a customer by exact name
#[utoipa::path(
    get,
    path = "/api/v1/clientes/buscar",
    params(SearchParams),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 400, description = "Missing or blank name", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "clientes"
)]
pub async fn search_customer_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> impl IntoResponse {
    let result = async {
        let Query(params) = params?;
        info!(nombre = %params.nombre, "GET /api/v1/clientes/buscar - search customer");

        Ok::<_, ApiError>(state.customer_service.get_by_name(&params.nombre).await?)
    }
    .await;

    match result {
        Ok(customer) => Json(mapper::entity_to_response(customer)).into_response(),
        Err(err) => err.into_response_at(uri.path()),
    }
}

/// List active customers
#[utoipa::path(
    get,
    path = "/api/v1/clientes",
    responses(
        (status = 200, description = "Active customers", body = [CustomerResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "clientes"
)]
pub async fn list_customers_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> impl IntoResponse {
    info!("GET /api/v1/clientes - list customers");

    match state.customer_service.list().await {
        Ok(customers) => Json(mapper::list_to_responses(customers)).into_response(),
        Err(err) => ApiError::from(err).into_response_at(uri.path()),
    }
}

/// Replace name, email and phone of a customer
#[utoipa::path(
    put,
    path = "/api/v1/clientes/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Invalid request body or id", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 409, description = "Name taken by another customer", body = ErrorResponse)
    ),
    tag = "clientes"
)]
pub async fn update_customer_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result = async {
        let id = customer_id(id)?;
        let request = valid_request(payload)?;
        info!(%id, "PUT /api/v1/clientes/{{id}} - update customer");

        let updated = state
            .customer_service
            .update(id, mapper::request_to_entity(request))
            .await?;
        Ok::<_, ApiError>(updated)
    }
    .await;

    match result {
        Ok(updated) => Json(mapper::entity_to_response(updated)).into_response(),
        Err(err) => err.into_response_at(uri.path()),
    }
}

/// Deactivate a customer (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/clientes/{id}",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer deactivated"),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "clientes"
)]
pub async fn delete_customer_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let result = async {
        let id = customer_id(id)?;
        info!(%id, "DELETE /api/v1/clientes/{{id}} - deactivate customer");

        Ok::<_, ApiError>(state.customer_service.soft_delete(id).await?)
    }
    .await;

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response_at(uri.path()),
    }
}

/// Remove a customer permanently
#[utoipa::path(
    delete,
    path = "/api/v1/clientes/{id}/permanente",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer removed"),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "clientes"
)]
pub async fn purge_customer_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> impl IntoResponse {
    let result = async {
        let id = customer_id(id)?;
        info!(%id, "DELETE /api/v1/clientes/{{id}}/permanente - remove customer");

        Ok::<_, ApiError>(state.customer_service.hard_delete(id).await?)
    }
    .await;

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response_at(uri.path()),
    }
}
