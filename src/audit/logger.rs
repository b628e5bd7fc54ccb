//! Appends audit records through the caller's transaction.

use super::record::AuditRecord;
use super::schema::AuditSchema;
use crate::engine::{PersistOp, TransitionError};
use crate::store::Transaction;
use tracing::debug;

/// Writes one [`AuditRecord`] per executed transition.
///
/// Failures are handed back to the caller as
/// [`TransitionError::PersistenceFailure`]; nothing is retried here.
#[derive(Clone, Debug)]
pub struct AuditLogger {
    schema: AuditSchema,
}

impl AuditLogger {
    /// Logger writing to `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            schema: AuditSchema::new(table),
        }
    }

    pub fn table(&self) -> &str {
        &self.schema.table
    }

    pub fn schema(&self) -> &AuditSchema {
        &self.schema
    }

    /// Create the audit table if missing. Safe to call on every start.
    pub fn setup_schema(&self, tx: &mut dyn Transaction) -> Result<(), TransitionError> {
        tx.ensure_table(&self.schema)
            .map_err(|source| TransitionError::persistence(PersistOp::SchemaSetup, source))?;
        debug!(table = %self.schema.table, "audit schema ready");
        Ok(())
    }

    /// Append `record` to the audit table.
    pub fn append(
        &self,
        tx: &mut dyn Transaction,
        record: &AuditRecord,
    ) -> Result<(), TransitionError> {
        tx.insert(&self.schema.table, record)
            .map_err(|source| TransitionError::persistence(PersistOp::AuditInsert, source))
    }
}
