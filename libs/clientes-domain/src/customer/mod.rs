//! Customer domain module
//!
//! The customer record, its identifier, the error taxonomy and the service
//! that enforces lifecycle and uniqueness rules.

mod entity;
mod error;
mod ids;
mod service;

pub use entity::Customer;
pub use error::{CustomerError, Result};
pub use ids::CustomerId;
pub use service::CustomerService;
