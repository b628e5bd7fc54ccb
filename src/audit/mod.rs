//! Durable audit trail of executed transitions.
//!
//! Every successful trigger appends exactly one [`AuditRecord`] through the
//! same transaction that persisted the state change. The table layout is
//! described by [`AuditSchema`] and created by [`AuditLogger::setup_schema`].

mod logger;
mod record;
mod schema;

pub use logger::AuditLogger;
pub use record::AuditRecord;
pub use schema::{AuditSchema, ColumnDef, ColumnKind, IndexDef};
