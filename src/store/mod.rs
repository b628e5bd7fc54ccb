//! The transactional handle the engine writes through.
//!
//! The engine never opens, commits, or rolls back a transaction. Callers
//! hand it a [`Transaction`] scoped to a unit of work they own; every write
//! of one `fire` call (state column and audit row) goes through that handle.

mod memory;

pub use memory::{MemoryStore, MemoryStoreError, MemoryTx};

use crate::audit::{AuditRecord, AuditSchema};
use crate::core::EntityRef;
use std::error::Error as StdError;

/// Error type returned by transactional handles.
pub type StoreError = Box<dyn StdError + Send + Sync>;

/// Persistence operations the engine needs, scoped to one open transaction.
pub trait Transaction {
    /// Write a single column of one entity, leaving every other column and
    /// association untouched.
    fn update_field(
        &mut self,
        target: &EntityRef<'_>,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Append one audit record to `table`.
    fn insert(&mut self, table: &str, record: &AuditRecord) -> Result<(), StoreError>;

    /// Create the audit table and its indexes if they do not exist yet.
    ///
    /// Must be idempotent.
    fn ensure_table(&mut self, schema: &AuditSchema) -> Result<(), StoreError>;
}
