//! Generic resource store: an id-keyed collection of typed records with CRUD operations.
//!
//! [`ResourceStore`] is the contract every backend implements, [`MemoryStore`] is the
//! owned in-process implementation, and [`validation`] holds the field-level checks run at
//! the request boundary before any store operation executes.

pub mod error;
pub mod memory;
pub mod record;
pub mod validation;

pub use error::StoreError;
pub use memory::{IdPolicy, MemoryStore};
pub use record::{Record, RecordId, ResourceStore};
pub use validation::{Rules, Validate, Violation};
