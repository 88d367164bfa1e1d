//! Customer routes

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{
    handlers::customer::{
        create_customer_handler, delete_customer_handler, get_customer_handler,
        list_customers_handler, purge_customer_handler, search_customer_handler,
        update_customer_handler,
    },
    AppState,
};

/// Create customer routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/clientes",
            post(create_customer_handler).get(list_customers_handler),
        )
        .route("/api/v1/clientes/buscar", get(search_customer_handler))
        .route(
            "/api/v1/clientes/:id",
            get(get_customer_handler)
                .put(update_customer_handler)
                .delete(delete_customer_handler),
        )
        .route(
            "/api/v1/clientes/:id/permanente",
            delete(purge_customer_handler),
        )
}
