//! # Custodia Core
//!
//! Core types and error definitions for the Custodia customer store.
//! This crate provides the entity, typed identifiers, and the error
//! taxonomy shared by every other layer.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
