//! Layout of the audit table.

use serde::{Deserialize, Serialize};

/// Column types used by the audit table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Uuid,
    UnsignedInt,
    /// Bounded text
    Text { max_len: u16 },
    Timestamp,
}

impl ColumnKind {
    /// Portable SQL type name.
    pub fn sql_type(&self) -> String {
        match self {
            Self::Uuid => "CHAR(36)".to_string(),
            Self::UnsignedInt => "BIGINT".to_string(),
            Self::Text { max_len } => format!("VARCHAR({max_len})"),
            Self::Timestamp => "TIMESTAMP".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnKind,
    pub primary_key: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    pub name: String,
    pub columns: Vec<String>,
}

/// Table name, columns, and indexes of the audit log.
///
/// Every column is `NOT NULL`. Indexes cover `(object_id, object_type)` for
/// per-entity history and `actor_id` for per-operator queries.
///
/// # Example
///
/// ```rust
/// use statekeeper::audit::AuditSchema;
///
/// let schema = AuditSchema::new("state_machine_logs");
/// let statements = schema.create_statements();
/// assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS state_machine_logs"));
/// assert_eq!(statements.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSchema {
    pub table: String,
    pub columns: Vec<ColumnDef>,
    pub indexes: Vec<IndexDef>,
}

const NAME_LEN: u16 = 64;

impl AuditSchema {
    pub fn new(table: impl Into<String>) -> Self {
        let table = table.into();
        let text = ColumnKind::Text { max_len: NAME_LEN };
        let columns = vec![
            column("id", ColumnKind::Uuid, true),
            column("object_id", ColumnKind::UnsignedInt, false),
            column("object_type", text, false),
            column("trigger", text, false),
            column("source_state", text, false),
            column("dest_state", text, false),
            column("actor_id", ColumnKind::UnsignedInt, false),
            column("created_at", ColumnKind::Timestamp, false),
        ];
        let indexes = vec![
            IndexDef {
                name: format!("idx_{table}_object"),
                columns: vec!["object_id".to_string(), "object_type".to_string()],
            },
            IndexDef {
                name: format!("idx_{table}_actor"),
                columns: vec!["actor_id".to_string()],
            },
        ];

        Self {
            table,
            columns,
            indexes,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Idempotent DDL for SQL-backed transactions: one `CREATE TABLE` and
    /// one `CREATE INDEX` per index, all guarded by `IF NOT EXISTS`.
    pub fn create_statements(&self) -> Vec<String> {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let key = if c.primary_key { " PRIMARY KEY" } else { "" };
                format!("{} {} NOT NULL{key}", c.name, c.kind.sql_type())
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut statements = vec![format!(
            "CREATE TABLE IF NOT EXISTS {} ({columns})",
            self.table
        )];
        statements.extend(self.indexes.iter().map(|index| {
            format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                index.name,
                self.table,
                index.columns.join(", ")
            )
        }));
        statements
    }
}

fn column(name: &str, kind: ColumnKind, primary_key: bool) -> ColumnDef {
    ColumnDef {
        name: name.to_string(),
        kind,
        primary_key,
    }
}
