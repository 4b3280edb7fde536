//! # Custodia Repository
//!
//! Data access for the `customer` table:
//!
//! ```text
//! Caller
//!   ↓  Arc<dyn CustomerRepository>   (domain interface)
//! SqliteCustomerRepository           (SQLite / SQLx implementation)
//!   ↓
//! SQLite
//! ```
//!
//! Historically this library carried two near-duplicate DAO variants with
//! diverging not-found conventions (nullable vs. optional). They are
//! unified here into the single [`CustomerRepository`] contract: lookups
//! return `Option`, mutations return `bool`, and only genuine storage
//! failures surface as errors.
//!
//! Transaction boundaries are deliberately left to callers; every
//! operation is a single round trip against the pool.

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::SqliteCustomerRepository;
pub use traits::*;
