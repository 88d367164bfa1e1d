//! Clientes API - customer records over HTTP
//!
//! Create, read, update, soft-delete and list customers. Storage is
//! PostgreSQL or an in-process map, picked by `CLIENTES_STORAGE`.

mod config;
mod dto;
mod error;
mod handlers;
mod mapper;
mod routes;
mod shutdown;
mod storage;
mod validation;

use std::sync::Arc;

use anyhow::{Context, Result};
use clientes_domain::CustomerService;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::{AppConfig, LogFormat},
    storage::CustomerStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService<CustomerStore>>,
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(config.log_format);

    info!(storage = ?config.storage, "Starting Clientes API");

    let store = CustomerStore::from_config(&config).await?;
    let state = AppState {
        customer_service: Arc::new(CustomerService::new(store)),
    };

    let app = routes::create_router(state);

    let addr = config.socket_addr();
    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = shutdown::listen().await {
                error!(error = %err, "Shutdown signal handler failed");
            }
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
