//! SQLite customer repository implementation.

use crate::{traits::CustomerRepository, DatabasePool};
use async_trait::async_trait;
use custodia_core::{Customer, CustomerId, CustodiaError, CustodiaResult};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite customer repository implementation.
///
/// All statements are parameterized; no SQL text is ever built from
/// caller-supplied values. Generated keys come from `last_insert_rowid()`.
#[derive(Clone)]
pub struct SqliteCustomerRepository {
    pool: Arc<DatabasePool>,
}

impl SqliteCustomerRepository {
    /// Creates a new SQLite customer repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a customer.
#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: Some(CustomerId::from_i64(row.id)),
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn create(&self, customer: &Customer) -> CustodiaResult<Customer> {
        debug!("Creating customer: {}", customer.name);

        if let Some(id) = customer.id {
            return Err(CustodiaError::Validation(format!(
                "customer already has id {}, refusing to re-create",
                id
            )));
        }

        let result = sqlx::query("INSERT INTO customer (name, email) VALUES (?, ?)")
            .bind(&customer.name)
            .bind(&customer.email)
            .execute(self.pool.inner())
            .await?;

        let id = CustomerId::from_i64(result.last_insert_rowid());

        Ok(Customer {
            id: Some(id),
            name: customer.name.clone(),
            email: customer.email.clone(),
        })
    }

    async fn find_all(&self) -> CustodiaResult<Vec<Customer>> {
        debug!("Finding all customers");

        let rows = sqlx::query_as::<_, CustomerRow>("SELECT id, name, email FROM customer")
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: CustomerId) -> CustodiaResult<Option<Customer>> {
        debug!("Finding customer by id: {}", id);

        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, email FROM customer WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn update(&self, customer: &Customer) -> CustodiaResult<bool> {
        let Some(id) = customer.id else {
            return Err(CustodiaError::Validation(
                "cannot update a customer without an id".to_string(),
            ));
        };

        debug!("Updating customer: {}", id);

        let result = sqlx::query("UPDATE customer SET name = ?, email = ? WHERE id = ?")
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: CustomerId) -> CustodiaResult<bool> {
        debug!("Deleting customer: {}", id);

        let result = sqlx::query("DELETE FROM customer WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn count(&self) -> CustodiaResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count.unsigned_abs())
    }
}

impl std::fmt::Debug for SqliteCustomerRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCustomerRepository").finish_non_exhaustive()
    }
}
