//! PostgreSQL Customer Repository Implementation
//!
//! This module implements the `CustomerRepository` trait on top of sqlx. Name
//! and email uniqueness are enforced by the `clientes` table constraints, and
//! every write is a single statement.

use std::future::Future;

use chrono::{DateTime, Utc};
use clientes_domain::{Customer, CustomerError, CustomerId, CustomerRepository};
use sqlx::{
    error::ErrorKind,
    postgres::{PgPoolOptions, PgRow},
    query, query_as, query_scalar, FromRow, PgPool, Postgres, Row,
};
use tracing::{debug, error, info, Instrument};

const CREATE_TABLE_SQL: &str = include_str!("sql/create_table.sql");
const FIND_BY_ID_SQL: &str = include_str!("sql/find_by_id.sql");
const FIND_BY_NAME_SQL: &str = include_str!("sql/find_by_name.sql");
const FIND_BY_EMAIL_SQL: &str = include_str!("sql/find_by_email.sql");
const EXISTS_BY_NAME_SQL: &str = include_str!("sql/exists_by_name.sql");
const EXISTS_BY_ID_SQL: &str = include_str!("sql/exists_by_id.sql");
const FIND_BY_ACTIVE_SQL: &str = include_str!("sql/find_by_active.sql");
const INSERT_SQL: &str = include_str!("sql/insert.sql");
const UPDATE_SQL: &str = include_str!("sql/update.sql");
const DELETE_BY_ID_SQL: &str = include_str!("sql/delete_by_id.sql");

const EMAIL_CONSTRAINT: &str = "clientes_email_key";

/// sqlx-backed implementation of the CustomerRepository port
///
/// ## Error Handling
///
/// - unique constraint violations become `CustomerError::AlreadyExists`,
///   naming `email` or `nombre` from the violated constraint
/// - every other sqlx error becomes `CustomerError::StorageFailure`
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Wrap an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use clientes_storage::PostgresCustomerRepository;
    ///
    /// # async fn example() -> Result<(), sqlx::Error> {
    /// let repo = PostgresCustomerRepository::connect("postgres://localhost/clientes", 10).await?;
    /// repo.ensure_schema().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!(max_connections, "Connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Create the `clientes` table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        query(CREATE_TABLE_SQL).execute(&self.pool).await?;

        info!("Schema for table clientes is in place");
        Ok(())
    }
}

struct CustomerRow(Customer);

impl<'r> FromRow<'r, PgRow> for CustomerRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(Customer::from_parts(
            CustomerId::new(row.try_get("id")?),
            row.try_get("nombre")?,
            row.try_get("email")?,
            row.try_get("telefono")?,
            row.try_get::<DateTime<Utc>, _>("fecha_registro")?,
            row.try_get("activo")?,
        )))
    }
}

fn storage_failure(operation: &str, err: sqlx::Error) -> CustomerError {
    error!(operation, error = ?err, "PostgreSQL operation failed");
    CustomerError::storage_failure(format!("{} failed: {}", operation, err))
}

/// Map a failed write, turning unique violations into domain conflicts
fn write_failure(operation: &str, err: sqlx::Error, customer: &Customer) -> CustomerError {
    let violated = err
        .as_database_error()
        .filter(|db| matches!(db.kind(), ErrorKind::UniqueViolation))
        .map(|db| db.constraint() == Some(EMAIL_CONSTRAINT));

    match violated {
        Some(true) => {
            debug!(operation, "Email unique constraint violated");
            CustomerError::email_taken(customer.email().unwrap_or_default())
        }
        Some(false) => {
            debug!(operation, "Name unique constraint violated");
            CustomerError::name_taken(customer.name())
        }
        None => storage_failure(operation, err),
    }
}

impl CustomerRepository for PostgresCustomerRepository {
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        let pool = self.pool.clone();

        async move {
            debug!("Selecting customer by id");

            let row = query_as::<Postgres, CustomerRow>(FIND_BY_ID_SQL)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(|err| storage_failure("find_by_id", err))?;

            Ok(row.map(|CustomerRow(customer)| customer))
        }
        .instrument(tracing::debug_span!("customers.find_by_id", %id))
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_owned();

        async move {
            debug!("Selecting customer by name");

            let row = query_as::<Postgres, CustomerRow>(FIND_BY_NAME_SQL)
                .bind(&name)
                .fetch_optional(&pool)
                .await
                .map_err(|err| storage_failure("find_by_name", err))?;

            Ok(row.map(|CustomerRow(customer)| customer))
        }
        .instrument(tracing::debug_span!("customers.find_by_name"))
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_owned();

        async move {
            debug!("Selecting customer by email");

            let row = query_as::<Postgres, CustomerRow>(FIND_BY_EMAIL_SQL)
                .bind(&email)
                .fetch_optional(&pool)
                .await
                .map_err(|err| storage_failure("find_by_email", err))?;

            Ok(row.map(|CustomerRow(customer)| customer))
        }
        .instrument(tracing::debug_span!("customers.find_by_email"))
    }

    fn exists_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
        let pool = self.pool.clone();
        let name = name.to_owned();

        async move {
            query_scalar::<Postgres, bool>(EXISTS_BY_NAME_SQL)
                .bind(&name)
                .fetch_one(&pool)
                .await
                .map_err(|err| storage_failure("exists_by_name", err))
        }
        .instrument(tracing::debug_span!("customers.exists_by_name"))
    }

    fn exists_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
        let pool = self.pool.clone();

        async move {
            query_scalar::<Postgres, bool>(EXISTS_BY_ID_SQL)
                .bind(id.get())
                .fetch_one(&pool)
                .await
                .map_err(|err| storage_failure("exists_by_id", err))
        }
        .instrument(tracing::debug_span!("customers.exists_by_id", %id))
    }

    fn find_by_active(
        &self,
        active: bool,
    ) -> impl Future<Output = Result<Vec<Customer>, CustomerError>> + Send {
        let pool = self.pool.clone();

        async move {
            let rows = query_as::<Postgres, CustomerRow>(FIND_BY_ACTIVE_SQL)
                .bind(active)
                .fetch_all(&pool)
                .await
                .map_err(|err| storage_failure("find_by_active", err))?;

            debug!(count = rows.len(), "Selected customers by activation state");
            Ok(rows.into_iter().map(|CustomerRow(customer)| customer).collect())
        }
        .instrument(tracing::debug_span!("customers.find_by_active", active))
    }

    fn save(
        &self,
        mut customer: Customer,
    ) -> impl Future<Output = Result<Customer, CustomerError>> + Send {
        let pool = self.pool.clone();

        async move {
            match customer.id() {
                None => {
                    let registered_at = customer.on_create();

                    let CustomerRow(stored) = query_as::<Postgres, CustomerRow>(INSERT_SQL)
                        .bind(customer.name())
                        .bind(customer.email())
                        .bind(customer.phone())
                        .bind(registered_at)
                        .bind(customer.is_active())
                        .fetch_one(&pool)
                        .await
                        .map_err(|err| write_failure("insert", err, &customer))?;

                    debug!(id = ?stored.id(), "Inserted customer");
                    Ok(stored)
                }
                Some(id) => {
                    let row = query_as::<Postgres, CustomerRow>(UPDATE_SQL)
                        .bind(id.get())
                        .bind(customer.name())
                        .bind(customer.email())
                        .bind(customer.phone())
                        .bind(customer.is_active())
                        .fetch_optional(&pool)
                        .await
                        .map_err(|err| write_failure("update", err, &customer))?;

                    let CustomerRow(stored) =
                        row.ok_or_else(|| CustomerError::not_found_by_id(id))?;

                    debug!(%id, "Updated customer");
                    Ok(stored)
                }
            }
        }
        .instrument(tracing::debug_span!("customers.save"))
    }

    fn delete_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<(), CustomerError>> + Send {
        let pool = self.pool.clone();

        async move {
            let removed = query(DELETE_BY_ID_SQL)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(|err| storage_failure("delete_by_id", err))?
                .rows_affected();

            debug!(removed, "Deleted customer rows");
            Ok(())
        }
        .instrument(tracing::debug_span!("customers.delete_by_id", %id))
    }
}
