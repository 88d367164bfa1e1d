//! Storage adapters

mod memory_repository;
mod postgres_repository;

pub use memory_repository::InMemoryCustomerRepository;
pub use postgres_repository::PostgresCustomerRepository;
