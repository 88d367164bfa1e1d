//! Storage ports

mod ports;

pub use ports::CustomerRepository;
