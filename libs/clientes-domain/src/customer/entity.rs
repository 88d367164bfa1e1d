//! Domain entity for customer records
//!
//! A Customer is the single record type managed by the service. It is created
//! unsaved (no id, no registration timestamp), normalized exactly once when it
//! is first persisted, and afterwards only its contact fields and activation
//! flag change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CustomerId;

/// A customer record
///
/// - `id` is assigned by the storage and never changes afterwards
/// - `registered_at` is set once, on first insert, and never updated
/// - `active` starts `true` and only the service flips it to `false`
///
/// # Example
///
/// ```rust
/// use clientes_domain::customer::Customer;
///
/// let mut customer = Customer::new("Maria Lopez", Some("maria@example.com".into()), None);
/// assert!(customer.id().is_none());
/// assert!(customer.is_active());
///
/// customer.on_create();
/// assert!(customer.registered_at().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Storage-assigned identifier, `None` until the first save
    id: Option<CustomerId>,

    /// Unique display name
    name: String,

    /// Contact email, unique when present
    email: Option<String>,

    /// Contact phone number
    phone: Option<String>,

    /// Timestamp of the first insert
    registered_at: Option<DateTime<Utc>>,

    /// Soft-delete flag
    active: bool,
}

impl Customer {
    /// Create an unsaved customer from its writable fields
    pub fn new(name: impl Into<String>, email: Option<String>, phone: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email,
            phone,
            registered_at: None,
            active: true,
        }
    }

    /// Rebuild a stored customer (used by storage adapters)
    pub fn from_parts(
        id: CustomerId,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        registered_at: DateTime<Utc>,
        active: bool,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            email,
            phone,
            registered_at: Some(registered_at),
            active,
        }
    }

    pub fn id(&self) -> Option<CustomerId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn registered_at(&self) -> Option<&DateTime<Utc>> {
        self.registered_at.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Check if this customer has been assigned an id by the storage
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Creation-time normalization
    ///
    /// Storage adapters call this right before inserting a new record. The
    /// registration timestamp is only assigned when it is still unset, so
    /// calling it again never moves it. Returns the effective timestamp.
    pub fn on_create(&mut self) -> DateTime<Utc> {
        *self.registered_at.get_or_insert_with(Utc::now)
    }

    /// Overwrite the contact fields with the ones carried by `changes`
    ///
    /// `id`, `registered_at` and `active` are left untouched.
    pub fn apply_changes(&mut self, changes: Customer) {
        self.name = changes.name;
        self.email = changes.email;
        self.phone = changes.phone;
    }

    /// Soft delete. There is no inverse operation.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
