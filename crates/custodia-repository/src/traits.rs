//! Repository trait definitions.

use async_trait::async_trait;
use custodia_core::{Customer, CustomerId, CustodiaResult};

/// Customer repository trait.
///
/// The single data-access contract for the `customer` table. Absence is
/// never an error here: lookups return `Option`, mutations return `bool`.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persists a new customer and returns it with the engine-assigned key.
    ///
    /// The input must not carry an id; the storage engine assigns one.
    async fn create(&self, customer: &Customer) -> CustodiaResult<Customer>;

    /// Returns all customers, in storage-engine-determined order.
    ///
    /// Yields an empty vec, never an error, for an empty table. Callers
    /// must not rely on any particular ordering.
    async fn find_all(&self) -> CustodiaResult<Vec<Customer>>;

    /// Finds a customer by ID. `Ok(None)` when no row matches.
    async fn find_by_id(&self, id: CustomerId) -> CustodiaResult<Option<Customer>>;

    /// Updates the name and email of an existing customer.
    ///
    /// Returns `true` iff exactly one row was affected, `false` when the
    /// id does not exist.
    async fn update(&self, customer: &Customer) -> CustodiaResult<bool>;

    /// Deletes a customer by ID. Returns `true` iff a row was removed.
    async fn delete(&self, id: CustomerId) -> CustodiaResult<bool>;

    /// Counts all customers.
    async fn count(&self) -> CustodiaResult<u64>;
}
