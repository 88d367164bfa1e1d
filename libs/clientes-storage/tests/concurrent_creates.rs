//! Concurrent creates racing on the same name.
//!
//! The service checks the name and then writes in two separate storage calls.
//! These tests make sure the storage-level uniqueness rule still leaves exactly
//! one winner when many requests pass the check at the same time.

use std::sync::Arc;

use clientes_domain::{Customer, CustomerError, CustomerService};
use clientes_storage::InMemoryCustomerRepository;
use clientes_domain::CustomerRepository;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_name_concurrent_creates_leave_one_record() {
    let repo = InMemoryCustomerRepository::new();
    let service = Arc::new(CustomerService::new(repo.clone()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .create(Customer::new(
                        "Maria Lopez",
                        Some(format!("maria{}@example.com", i)),
                        None,
                    ))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(CustomerError::AlreadyExists { field: "nombre", .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 15);
    assert_eq!(repo.len().await, 1);
    assert_eq!(repo.find_by_active(true).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_names_concurrent_creates_get_distinct_ids() {
    let repo = InMemoryCustomerRepository::new();
    let service = Arc::new(CustomerService::new(repo.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            let name = format!("Cliente {}", char::from(b'A' + i));
            tokio::spawn(async move { service.create(Customer::new(name, None, None)).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id().unwrap());
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 8);
}
