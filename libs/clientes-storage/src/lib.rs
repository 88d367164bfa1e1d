//! # Clientes Storage Adapters
//!
//! Implementations of the `CustomerRepository` port:
//!
//! - [`PostgresCustomerRepository`]: sqlx over PostgreSQL, uniqueness enforced
//!   by unique constraints
//! - [`InMemoryCustomerRepository`]: process-local store with the same rules,
//!   for tests and database-less runs

pub mod infrastructure;

pub use infrastructure::{InMemoryCustomerRepository, PostgresCustomerRepository};
