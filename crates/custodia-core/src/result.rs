//! Result type aliases for Custodia.

use crate::CustodiaError;

/// A specialized `Result` type for Custodia operations.
pub type CustodiaResult<T> = Result<T, CustodiaError>;
