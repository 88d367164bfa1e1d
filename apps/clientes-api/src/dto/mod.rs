//! Wire-level request and response shapes

pub mod customer;
