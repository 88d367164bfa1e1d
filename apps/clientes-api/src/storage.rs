//! Storage selection
//!
//! Wraps the available adapters behind one concrete type so the service and
//! handlers stay statically dispatched whatever `CLIENTES_STORAGE` says.

use std::future::Future;

use anyhow::{Context, Result};
use clientes_domain::{Customer, CustomerError, CustomerId, CustomerRepository};
use clientes_storage::{InMemoryCustomerRepository, PostgresCustomerRepository};
use tracing::info;

use crate::config::{AppConfig, StorageBackend};

/// The storage adapter chosen at startup
#[derive(Debug, Clone)]
pub enum CustomerStore {
    Postgres(PostgresCustomerRepository),
    Memory(InMemoryCustomerRepository),
}

impl CustomerStore {
    /// Build the adapter described by the configuration
    ///
    /// For PostgreSQL this opens the pool and makes sure the table exists.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        match config.storage {
            StorageBackend::Memory => {
                info!("Using in-memory customer storage");
                Ok(Self::Memory(InMemoryCustomerRepository::new()))
            }
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL must be set when CLIENTES_STORAGE=postgres")?;

                let repository = PostgresCustomerRepository::connect(url, config.max_connections)
                    .await
                    .context("failed to connect to PostgreSQL")?;
                repository
                    .ensure_schema()
                    .await
                    .context("failed to prepare the clientes table")?;

                info!("Using PostgreSQL customer storage");
                Ok(Self::Postgres(repository))
            }
        }
    }
}

impl CustomerRepository for CustomerStore {
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.find_by_id(id).await,
                Self::Memory(repo) => repo.find_by_id(id).await,
            }
        }
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.find_by_name(name).await,
                Self::Memory(repo) => repo.find_by_name(name).await,
            }
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.find_by_email(email).await,
                Self::Memory(repo) => repo.find_by_email(email).await,
            }
        }
    }

    fn exists_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.exists_by_name(name).await,
                Self::Memory(repo) => repo.exists_by_name(name).await,
            }
        }
    }

    fn exists_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.exists_by_id(id).await,
                Self::Memory(repo) => repo.exists_by_id(id).await,
            }
        }
    }

    fn find_by_active(
        &self,
        active: bool,
    ) -> impl Future<Output = Result<Vec<Customer>, CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.find_by_active(active).await,
                Self::Memory(repo) => repo.find_by_active(active).await,
            }
        }
    }

    fn save(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.save(customer).await,
                Self::Memory(repo) => repo.save(customer).await,
            }
        }
    }

    fn delete_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<(), CustomerError>> + Send {
        async move {
            match self {
                Self::Postgres(repo) => repo.delete_by_id(id).await,
                Self::Memory(repo) => repo.delete_by_id(id).await,
            }
        }
    }
}
