//! HTTP handlers

pub mod customer;
