//! # Clientes Domain Layer
//!
//! Business rules for customer records, following hexagonal architecture:
//!
//! - **Entities**: the `Customer` record and its creation-time normalization
//! - **Ports**: `CustomerRepository`, the storage contract adapters implement
//! - **Services**: `CustomerService`, the only place that decides existence,
//!   uniqueness and activation state
//!
//! ## Architecture
//!
//! This crate has NO dependencies on infrastructure (SQL drivers, HTTP, etc.).
//! Storage is expressed as a trait and provided by an adapter crate.
//!
//! ## Example
//!
//! ```rust
//! use clientes_domain::customer::{Customer, CustomerError, CustomerService};
//! use clientes_domain::storage::CustomerRepository;
//!
//! async fn example<R: CustomerRepository>(
//!     service: CustomerService<R>,
//! ) -> Result<(), CustomerError> {
//!     let draft = Customer::new("Maria Lopez", Some("maria@example.com".into()), None);
//!     let created = service.create(draft).await?;
//!     println!("Created customer {:?}", created.id());
//!     Ok(())
//! }
//! ```

pub mod customer;
pub mod storage;

// Re-export commonly used types
pub use customer::{Customer, CustomerError, CustomerId, CustomerService};
pub use storage::CustomerRepository;
