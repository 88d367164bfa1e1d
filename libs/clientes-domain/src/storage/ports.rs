//! Ports (trait definitions) for external dependencies
//!
//! The domain defines what it needs from storage; adapter crates provide it.
//!
//! ## Static Dispatch
//!
//! We use native Rust async traits with `impl Future` return types instead of
//! `async_trait` so every adapter is monomorphized into the service.

use std::future::Future;

use crate::customer::{Customer, CustomerError, CustomerId};

/// Port for customer persistence
///
/// Implementations must:
/// - assign a fresh, never reused id when saving a customer without one
/// - call [`Customer::on_create`] before inserting a new record
/// - never write the registration timestamp on update
/// - never flip `active` from `false` back to `true` on update
/// - reject a save that would duplicate a name or an email with
///   `CustomerError::AlreadyExists`
/// - convert every infrastructure error into a `CustomerError`
pub trait CustomerRepository: Send + Sync {
    /// Look up a customer by id, whatever its activation state
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send;

    /// Exact-match lookup by name
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send;

    /// Exact-match lookup by email
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send;

    /// Check whether any customer, active or not, holds this name
    fn exists_by_name(&self, name: &str)
        -> impl Future<Output = Result<bool, CustomerError>> + Send;

    /// Check whether a customer with this id exists
    fn exists_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<bool, CustomerError>> + Send;

    /// All customers with the given activation state, in ascending id order
    fn find_by_active(
        &self,
        active: bool,
    ) -> impl Future<Output = Result<Vec<Customer>, CustomerError>> + Send;

    /// Insert (no id) or overwrite (id present) a customer
    ///
    /// # Returns
    ///
    /// The stored record, including its assigned id and registration timestamp
    ///
    /// # Errors
    ///
    /// - `CustomerError::AlreadyExists` on a name or email collision
    /// - `CustomerError::NotFound` when updating an id that no longer exists
    /// - `CustomerError::StorageFailure` if the backend fails
    fn save(
        &self,
        customer: Customer,
    ) -> impl Future<Output = Result<Customer, CustomerError>> + Send;

    /// Permanently remove a customer; removing a missing id is a no-op
    fn delete_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<(), CustomerError>> + Send;
}
