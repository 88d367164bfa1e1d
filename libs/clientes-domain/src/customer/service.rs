//! Customer service - Business logic orchestration
//!
//! The only component allowed to decide existence, uniqueness and activation
//! state. Storage is reached exclusively through the `CustomerRepository` port.

use tracing::{info, warn};

use super::{Customer, CustomerError, CustomerId};
use crate::storage::CustomerRepository;

/// Service enforcing the customer lifecycle rules
///
/// - names are unique across active and inactive customers
/// - soft delete only ever flips `active` to `false`
/// - `id` and `registered_at` never change after creation
///
/// The uniqueness pre-check and the write are separate storage calls. Adapters
/// reject duplicate names on their own, so two concurrent creates racing past
/// the pre-check still end with a single record and an `AlreadyExists` for
/// the loser.
///
/// ## Static Dispatch
///
/// The service is generic over any `CustomerRepository` implementation.
pub struct CustomerService<R> {
    repository: R,
}

impl<R> CustomerService<R>
where
    R: CustomerRepository,
{
    /// Create a new CustomerService backed by the given repository
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Register a new customer
    ///
    /// # Errors
    ///
    /// - `CustomerError::AlreadyExists` if any customer already has this name
    /// - `CustomerError::IllegalArgument` if the draft already carries an id
    /// - `CustomerError::StorageFailure` if storage fails
    pub async fn create(&self, draft: Customer) -> Result<Customer, CustomerError> {
        info!(name = %draft.name(), "Creating customer");

        if let Some(id) = draft.id() {
            return Err(CustomerError::illegal_argument(format!(
                "Un cliente nuevo no puede traer id: {}",
                id
            )));
        }

        if self.repository.exists_by_name(draft.name()).await? {
            warn!(name = %draft.name(), "Customer name already taken");
            return Err(CustomerError::name_taken(draft.name()));
        }

        let created = self.repository.save(draft).await?;

        info!(id = ?created.id(), "Customer created");
        Ok(created)
    }

    /// Fetch a customer by id, active or not
    ///
    /// # Errors
    ///
    /// `CustomerError::NotFound` if no customer has this id
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Customer, CustomerError> {
        info!(%id, "Fetching customer by id");

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::not_found_by_id(id))
    }

    /// Fetch a customer by exact name
    ///
    /// # Errors
    ///
    /// `CustomerError::NotFound` if no customer has this name, blank included
    pub async fn get_by_name(&self, name: &str) -> Result<Customer, CustomerError> {
        info!(%name, "Fetching customer by name");

        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| CustomerError::not_found_by_name(name))
    }

    /// List every active customer
    pub async fn list(&self) -> Result<Vec<Customer>, CustomerError> {
        info!("Listing active customers");

        self.repository.find_by_active(true).await
    }

    /// Overwrite name, email and phone of an existing customer
    ///
    /// Keeping the current name never counts as a collision.
    ///
    /// # Errors
    ///
    /// - `CustomerError::NotFound` if `id` is absent
    /// - `CustomerError::AlreadyExists` if the new name belongs to another customer
    pub async fn update(&self, id: CustomerId, changes: Customer) -> Result<Customer, CustomerError> {
        info!(%id, "Updating customer");

        let mut stored = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::not_found_by_id(id))?;

        if stored.name() != changes.name() && self.repository.exists_by_name(changes.name()).await? {
            warn!(%id, name = %changes.name(), "Customer name already taken");
            return Err(CustomerError::name_taken(changes.name()));
        }

        stored.apply_changes(changes);
        let updated = self.repository.save(stored).await?;

        info!(%id, "Customer updated");
        Ok(updated)
    }

    /// Mark a customer inactive; repeating it is harmless
    ///
    /// # Errors
    ///
    /// `CustomerError::NotFound` if `id` is absent
    pub async fn soft_delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        info!(%id, "Deactivating customer");

        let mut stored = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::not_found_by_id(id))?;

        stored.deactivate();
        self.repository.save(stored).await?;

        info!(%id, "Customer deactivated");
        Ok(())
    }

    /// Remove a customer permanently
    ///
    /// # Errors
    ///
    /// `CustomerError::NotFound` if `id` is absent
    pub async fn hard_delete(&self, id: CustomerId) -> Result<(), CustomerError> {
        info!(%id, "Permanently deleting customer");

        if !self.repository.exists_by_id(id).await? {
            return Err(CustomerError::not_found_by_id(id));
        }

        self.repository.delete_by_id(id).await?;

        info!(%id, "Customer permanently deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    // In-memory storage for testing, counting writes
    #[derive(Default)]
    struct InMemoryStorage {
        rows: Arc<Mutex<BTreeMap<CustomerId, Customer>>>,
        next_id: Arc<Mutex<i64>>,
        saves: Arc<AtomicUsize>,
    }

    impl InMemoryStorage {
        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    impl CustomerRepository for InMemoryStorage {
        fn find_by_id(
            &self,
            id: CustomerId,
        ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
            let rows = self.rows.clone();
            async move { Ok(rows.lock().unwrap().get(&id).cloned()) }
        }

        fn find_by_name(
            &self,
            name: &str,
        ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
            let rows = self.rows.clone();
            let name = name.to_string();
            async move {
                Ok(rows
                    .lock()
                    .unwrap()
                    .values()
                    .find(|c| c.name() == name)
                    .cloned())
            }
        }

        fn find_by_email(
            &self,
            email: &str,
        ) -> impl Future<Output = Result<Option<Customer>, CustomerError>> + Send {
            let rows = self.rows.clone();
            let email = email.to_string();
            async move {
                Ok(rows
                    .lock()
                    .unwrap()
                    .values()
                    .find(|c| c.email() == Some(email.as_str()))
                    .cloned())
            }
        }

        fn exists_by_name(
            &self,
            name: &str,
        ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
            let rows = self.rows.clone();
            let name = name.to_string();
            async move { Ok(rows.lock().unwrap().values().any(|c| c.name() == name)) }
        }

        fn exists_by_id(
            &self,
            id: CustomerId,
        ) -> impl Future<Output = Result<bool, CustomerError>> + Send {
            let rows = self.rows.clone();
            async move { Ok(rows.lock().unwrap().contains_key(&id)) }
        }

        fn find_by_active(
            &self,
            active: bool,
        ) -> impl Future<Output = Result<Vec<Customer>, CustomerError>> + Send {
            let rows = self.rows.clone();
            async move {
                Ok(rows
                    .lock()
                    .unwrap()
                    .values()
                    .filter(|c| c.is_active() == active)
                    .cloned()
                    .collect())
            }
        }

        fn save(
            &self,
            mut customer: Customer,
        ) -> impl Future<Output = Result<Customer, CustomerError>> + Send {
            let rows = self.rows.clone();
            let next_id = self.next_id.clone();
            self.saves.fetch_add(1, Ordering::SeqCst);

            async move {
                let mut rows = rows.lock().unwrap();
                let registered_at = customer.on_create();
                let id = match customer.id() {
                    Some(id) => id,
                    None => {
                        let mut next = next_id.lock().unwrap();
                        *next += 1;
                        CustomerId::new(*next)
                    }
                };
                let stored = Customer::from_parts(
                    id,
                    customer.name().to_string(),
                    customer.email().map(str::to_string),
                    customer.phone().map(str::to_string),
                    registered_at,
                    customer.is_active(),
                );
                rows.insert(id, stored.clone());
                Ok(stored)
            }
        }

        fn delete_by_id(
            &self,
            id: CustomerId,
        ) -> impl Future<Output = Result<(), CustomerError>> + Send {
            let rows = self.rows.clone();
            async move {
                rows.lock().unwrap().remove(&id);
                Ok(())
            }
        }
    }

    fn juan() -> Customer {
        Customer::new(
            "Juan Perez",
            Some("juan.perez@example.com".to_string()),
            Some("1234567890".to_string()),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_id_timestamp_and_active() {
        let service = CustomerService::new(InMemoryStorage::default());

        let created = service.create(juan()).await.unwrap();

        assert!(created.id().is_some());
        assert!(created.registered_at().is_some());
        assert!(created.is_active());
        assert_eq!(created.name(), "Juan Perez");
        assert_eq!(created.email(), Some("juan.perez@example.com"));
        assert_eq!(created.phone(), Some("1234567890"));
    }

    #[tokio::test]
    async fn test_create_duplicate_name_fails_without_saving() {
        let service = CustomerService::new(InMemoryStorage::default());
        service.create(juan()).await.unwrap();

        let result = service
            .create(Customer::new("Juan Perez", Some("otro@example.com".to_string()), None))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, CustomerError::AlreadyExists { field: "nombre", .. }));
        assert!(err.to_string().contains("Juan Perez"));
        assert_eq!(service.repository.save_count(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_of_inactive_customer_fails() {
        let service = CustomerService::new(InMemoryStorage::default());
        let created = service.create(juan()).await.unwrap();
        service.soft_delete(created.id().unwrap()).await.unwrap();

        let result = service.create(juan()).await;

        assert!(matches!(result, Err(CustomerError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_draft_with_id() {
        let service = CustomerService::new(InMemoryStorage::default());
        let stored = service.create(juan()).await.unwrap();

        let result = service.create(stored).await;

        assert!(matches!(result, Err(CustomerError::IllegalArgument(_))));
    }

    #[tokio::test]
    async fn test_get_by_id_returns_customer() {
        let service = CustomerService::new(InMemoryStorage::default());
        let created = service.create(juan()).await.unwrap();

        let found = service.get_by_id(created.id().unwrap()).await.unwrap();

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_fails_with_not_found() {
        let service = CustomerService::new(InMemoryStorage::default());

        let err = service.get_by_id(CustomerId::new(999)).await.unwrap_err();

        assert!(matches!(err, CustomerError::NotFound { field: "id", .. }));
        assert!(err.to_string().contains("999"));
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let service = CustomerService::new(InMemoryStorage::default());
        let created = service.create(juan()).await.unwrap();

        let found = service.get_by_name("Juan Perez").await.unwrap();
        assert_eq!(found.id(), created.id());

        let missing = service.get_by_name("Juan").await;
        assert!(matches!(missing, Err(CustomerError::NotFound { field: "nombre", .. })));
    }

    #[tokio::test]
    async fn test_get_by_blank_name_is_not_found() {
        let service = CustomerService::new(InMemoryStorage::default());
        service.create(juan()).await.unwrap();

        for blank in ["", "   "] {
            let result = service.get_by_name(blank).await;

            assert!(
                matches!(result, Err(CustomerError::NotFound { field: "nombre", .. })),
                "unexpected result for {blank:?}: {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_list_only_returns_active_customers() {
        let service = CustomerService::new(InMemoryStorage::default());
        let first = service.create(juan()).await.unwrap();
        let second = service
            .create(Customer::new("Maria Lopez", Some("maria@example.com".to_string()), None))
            .await
            .unwrap();

        service.soft_delete(first.id().unwrap()).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), second.id());
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_registration() {
        let service = CustomerService::new(InMemoryStorage::default());
        let created = service.create(juan()).await.unwrap();
        let id = created.id().unwrap();

        let updated = service
            .update(
                id,
                Customer::new(
                    "Juan Perez Updated",
                    Some("juan.updated@example.com".to_string()),
                    Some("9876543210".to_string()),
                ),
            )
            .await
            .unwrap();

        assert_eq!(updated.id(), Some(id));
        assert_eq!(updated.registered_at(), created.registered_at());
        assert!(updated.is_active());
        assert_eq!(updated.name(), "Juan Perez Updated");
        assert_eq!(updated.email(), Some("juan.updated@example.com"));
        assert_eq!(updated.phone(), Some("9876543210"));
    }

    #[tokio::test]
    async fn test_update_keeping_own_name_is_not_a_conflict() {
        let service = CustomerService::new(InMemoryStorage::default());
        let created = service.create(juan()).await.unwrap();

        let updated = service
            .update(
                created.id().unwrap(),
                Customer::new("Juan Perez", Some("nuevo@example.com".to_string()), None),
            )
            .await
            .unwrap();

        assert_eq!(updated.email(), Some("nuevo@example.com"));
        assert_eq!(updated.phone(), None);
    }

    #[tokio::test]
    async fn test_update_to_another_customers_name_fails() {
        let service = CustomerService::new(InMemoryStorage::default());
        service.create(juan()).await.unwrap();
        let maria = service
            .create(Customer::new("Maria Lopez", Some("maria@example.com".to_string()), None))
            .await
            .unwrap();

        let result = service
            .update(
                maria.id().unwrap(),
                Customer::new("Juan Perez", Some("maria@example.com".to_string()), None),
            )
            .await;

        assert!(matches!(result, Err(CustomerError::AlreadyExists { .. })));
        let unchanged = service.get_by_id(maria.id().unwrap()).await.unwrap();
        assert_eq!(unchanged.name(), "Maria Lopez");
    }

    #[tokio::test]
    async fn test_update_missing_fails_with_not_found() {
        let service = CustomerService::new(InMemoryStorage::default());

        let result = service.update(CustomerId::new(42), juan()).await;

        assert!(matches!(result, Err(CustomerError::NotFound { .. })));
        assert_eq!(service.repository.save_count(), 0);
    }

    #[tokio::test]
    async fn test_soft_delete_is_idempotent_and_keeps_record_visible() {
        let service = CustomerService::new(InMemoryStorage::default());
        let created = service.create(juan()).await.unwrap();
        let id = created.id().unwrap();

        service.soft_delete(id).await.unwrap();
        service.soft_delete(id).await.unwrap();

        let found = service.get_by_id(id).await.unwrap();
        assert!(!found.is_active());
        assert_eq!(found.registered_at(), created.registered_at());
    }

    #[tokio::test]
    async fn test_soft_delete_missing_fails_with_not_found() {
        let service = CustomerService::new(InMemoryStorage::default());

        let result = service.soft_delete(CustomerId::new(7)).await;

        assert!(matches!(result, Err(CustomerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_hard_delete_removes_record() {
        let service = CustomerService::new(InMemoryStorage::default());
        let created = service.create(juan()).await.unwrap();
        let id = created.id().unwrap();

        service.hard_delete(id).await.unwrap();

        assert!(matches!(
            service.get_by_id(id).await,
            Err(CustomerError::NotFound { .. })
        ));
        assert!(matches!(
            service.hard_delete(id).await,
            Err(CustomerError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_hard_delete() {
        let service = CustomerService::new(InMemoryStorage::default());
        let first = service.create(juan()).await.unwrap();
        service.hard_delete(first.id().unwrap()).await.unwrap();

        let second = service.create(juan()).await.unwrap();

        assert_ne!(first.id(), second.id());
    }
}
