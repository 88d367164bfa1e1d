//! API routes

pub mod customer;

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::customer::{CustomerRequest, CustomerResponse, ErrorResponse},
    handlers, AppState,
};

pub const HEALTH_MESSAGE: &str = "Cliente Service is UP";

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::customer::create_customer_handler,
        handlers::customer::get_customer_handler,
        handlers::customer::search_customer_handler,
        handlers::customer::list_customers_handler,
        handlers::customer::update_customer_handler,
        handlers::customer::delete_customer_handler,
        handlers::customer::purge_customer_handler,
        health_handler
    ),
    components(
        schemas(CustomerRequest, CustomerResponse, ErrorResponse)
    ),
    tags(
        (name = "clientes", description = "Customer management endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "Clientes API",
        version = "0.1.0",
        description = "CRUD service for customer records with soft delete"
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(customer::routes())
        .route("/api/v1/clientes/health", axum::routing::get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/clientes/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    HEALTH_MESSAGE
}
