//! In-memory Customer Repository Implementation
//!
//! Keeps customers in an ordered map behind an async lock. Uniqueness of name
//! and email is checked under the write lock, so check and insert are one
//! atomic step for this adapter.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use clientes_domain::{Customer, CustomerError, CustomerId, CustomerRepository};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<CustomerId, Customer>,
    last_id: i64,
}

impl Table {
    /// Find a row other than `own` whose name or email collides with `customer`
    fn conflict(&self, customer: &Customer, own: Option<CustomerId>) -> Option<CustomerError> {
        if self
            .rows
            .values()
            .any(|row| row.id() != own && row.name() == customer.name())
        {
            return Some(CustomerError::name_taken(customer.name()));
        }

        let email = customer.email()?;
        if self
            .rows
            .values()
            .any(|row| row.id() != own && row.email() == Some(email))
        {
            return Some(CustomerError::email_taken(email));
        }

        None
    }
}

/// Process-local implementation of the CustomerRepository port
///
/// Cloning shares the underlying table. Ids start at 1 and are never reused,
/// even after a permanent delete.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers, active or not
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        async move { Ok(self.table.read().await.rows.get(&id).cloned()) }
    }

    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        async move {
            let table = self.table.read().await;
            Ok(table.rows.values().find(|row| row.name() == name).cloned())
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
        async move {
            let table = self.table.read().await;
            Ok(table
                .rows
                .values()
                .find(|row| row.email() == Some(email))
                .cloned())
        }
    }

    fn exists_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
        async move {
            let table = self.table.read().await;
            Ok(table.rows.values().any(|row| row.name() == name))
        }
    }

    fn exists_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
        async move { Ok(self.table.read().await.rows.contains_key(&id)) }
    }

    fn find_by_active(
        &self,
        active: bool,
    ) -> impl Future<Output = Result<Vec<Customer>, CustomerError>> + Send {
        async move {
            let table = self.table.read().await;
            Ok(table
                .rows
                .values()
                .filter(|row| row.is_active() == active)
                .cloned()
                .collect())
        }
    }

    fn save(
        &self,
        mut customer: Customer,
    ) -> impl Future<Output = Result<Customer, CustomerError>> + Send {
        async move {
            let mut table = self.table.write().await;

            if let Some(conflict) = table.conflict(&customer, customer.id()) {
                debug!(error = %conflict, "Rejected save on uniqueness");
                return Err(conflict);
            }

            // Deactivation is one-way: a stale copy cannot bring a record back.
            let (id, registered_at, active) = match customer.id() {
                Some(id) => {
                    let stored = table
                        .rows
                        .get(&id)
                        .ok_or_else(|| CustomerError::not_found_by_id(id))?;
                    let registered_at = stored.registered_at().copied().ok_or_else(|| {
                        CustomerError::internal_error(format!(
                            "stored customer {} has no registration timestamp",
                            id
                        ))
                    })?;
                    (id, registered_at, stored.is_active() && customer.is_active())
                }
                None => {
                    let registered_at = customer.on_create();
                    table.last_id += 1;
                    (CustomerId::new(table.last_id), registered_at, customer.is_active())
                }
            };

            let stored = Customer::from_parts(
                id,
                customer.name().to_owned(),
                customer.email().map(str::to_owned),
                customer.phone().map(str::to_owned),
                registered_at,
                active,
            );
            table.rows.insert(id, stored.clone());

            debug!(%id, "Saved customer");
            Ok(stored)
        }
    }

    fn delete_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<(), CustomerError>> + Send {
        async move {
            let removed = self.table.write().await.rows.remove(&id).is_some();

            debug!(%id, removed, "Deleted customer");
            Ok(())
        }
    }
}
