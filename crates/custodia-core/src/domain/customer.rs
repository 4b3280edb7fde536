//! Customer entity.

use crate::CustomerId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Customer entity representing one row in the `customer` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Customer {
    /// Primary key assigned by the storage engine. `None` until the
    /// customer has been persisted for the first time.
    pub id: Option<CustomerId>,

    /// Customer's display name.
    #[validate(length(min = 1, max = 128))]
    pub name: String,

    /// Customer's email address.
    #[validate(email)]
    pub email: String,
}

impl Customer {
    /// Creates a new, not-yet-persisted customer.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Creates a customer with a known database key.
    #[must_use]
    pub fn with_id(id: CustomerId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Checks whether this customer has been assigned a database key.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
