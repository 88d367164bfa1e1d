use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Customer
///
/// Assigned by the storage on first save and never reused. Wrapping the raw
/// integer keeps customer ids from being mixed up with other numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Wrap a raw storage identifier
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CustomerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<CustomerId> for i64 {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}
