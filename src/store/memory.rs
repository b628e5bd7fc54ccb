//! Buffered in-memory store for tests and demos.
//!
//! Writes made through a [`MemoryTx`] are staged and only reach the
//! [`MemoryStore`] on [`MemoryTx::commit`]. Dropping the transaction, or
//! calling [`MemoryTx::rollback`], discards them.

use super::{StoreError, Transaction};
use crate::audit::{AuditRecord, AuditSchema};
use crate::core::EntityRef;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by the in-memory store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("table '{table}' does not exist; run schema setup first")]
    UnknownTable { table: String },
}

type FieldKey = (String, u64, String);

#[derive(Debug)]
struct MemoryTable {
    schema: AuditSchema,
    rows: Vec<AuditRecord>,
}

/// Committed data: entity columns and audit tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    fields: HashMap<FieldKey, String>,
    tables: HashMap<String, MemoryTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction. Only one can be open at a time.
    pub fn begin(&mut self) -> MemoryTx<'_> {
        MemoryTx {
            store: self,
            staged: Vec::new(),
        }
    }

    /// Committed value of one entity column.
    pub fn field(&self, target: &EntityRef<'_>, field: &str) -> Option<&str> {
        self.fields
            .get(&field_key(target, field))
            .map(String::as_str)
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    /// Schema a table was created with.
    pub fn schema(&self, table: &str) -> Option<&AuditSchema> {
        self.tables.get(table).map(|t| &t.schema)
    }

    /// Committed rows of `table` in insertion order.
    pub fn rows(&self, table: &str) -> &[AuditRecord] {
        self.tables
            .get(table)
            .map(|t| t.rows.as_slice())
            .unwrap_or(&[])
    }

    /// Committed transition history of one entity, oldest first.
    pub fn history(&self, table: &str, target: &EntityRef<'_>) -> Vec<&AuditRecord> {
        self.rows(table)
            .iter()
            .filter(|record| record.is_about(target))
            .collect()
    }

    fn apply(&mut self, write: Staged) {
        match write {
            Staged::Field { key, value } => {
                self.fields.insert(key, value);
            }
            Staged::Row { table, record } => {
                if let Some(table) = self.tables.get_mut(&table) {
                    table.rows.push(record);
                }
            }
            Staged::Table(schema) => {
                self.tables
                    .entry(schema.table.clone())
                    .or_insert_with(|| MemoryTable {
                        schema,
                        rows: Vec::new(),
                    });
            }
        }
    }
}

#[derive(Debug)]
enum Staged {
    Field { key: FieldKey, value: String },
    Row { table: String, record: AuditRecord },
    Table(AuditSchema),
}

/// An open transaction against a [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryTx<'s> {
    store: &'s mut MemoryStore,
    staged: Vec<Staged>,
}

impl MemoryTx<'_> {
    /// Apply every staged write to the store.
    pub fn commit(self) {
        let MemoryTx { store, staged } = self;
        for write in staged {
            store.apply(write);
        }
    }

    /// Discard every staged write.
    pub fn rollback(self) {}

    /// Number of writes waiting for commit.
    pub fn pending(&self) -> usize {
        self.staged.len()
    }

    /// Column value as seen inside this transaction.
    pub fn field(&self, target: &EntityRef<'_>, field: &str) -> Option<&str> {
        let key = field_key(target, field);
        self.staged
            .iter()
            .rev()
            .find_map(|write| match write {
                Staged::Field { key: k, value } if *k == key => Some(value.as_str()),
                _ => None,
            })
            .or_else(|| self.store.field(target, field))
    }

    /// Rows of `table` as seen inside this transaction.
    pub fn rows(&self, table: &str) -> Vec<&AuditRecord> {
        let staged = self.staged.iter().filter_map(|write| match write {
            Staged::Row { table: t, record } if t == table => Some(record),
            _ => None,
        });
        self.store.rows(table).iter().chain(staged).collect()
    }

    fn table_exists(&self, table: &str) -> bool {
        self.store.has_table(table)
            || self
                .staged
                .iter()
                .any(|write| matches!(write, Staged::Table(schema) if schema.table == table))
    }
}

impl Transaction for MemoryTx<'_> {
    fn update_field(
        &mut self,
        target: &EntityRef<'_>,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.staged.push(Staged::Field {
            key: field_key(target, field),
            value: value.to_string(),
        });
        Ok(())
    }

    fn insert(&mut self, table: &str, record: &AuditRecord) -> Result<(), StoreError> {
        if !self.table_exists(table) {
            return Err(Box::new(MemoryStoreError::UnknownTable {
                table: table.to_string(),
            }));
        }
        self.staged.push(Staged::Row {
            table: table.to_string(),
            record: record.clone(),
        });
        Ok(())
    }

    fn ensure_table(&mut self, schema: &AuditSchema) -> Result<(), StoreError> {
        if !self.table_exists(&schema.table) {
            self.staged.push(Staged::Table(schema.clone()));
        }
        Ok(())
    }
}

fn field_key(target: &EntityRef<'_>, field: &str) -> FieldKey {
    (
        target.type_name.to_string(),
        target.object_id,
        field.to_string(),
    )
}
