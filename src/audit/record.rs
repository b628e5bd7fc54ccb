//! Audit records of executed transitions.

use crate::core::EntityRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable log entry for one executed transition.
///
/// Created by the engine after the after-hook succeeds, appended through the
/// caller's transaction, and never updated or deleted afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    /// Identifier of the entity that changed state
    pub object_id: u64,
    /// Type name of the entity that changed state
    pub object_type: String,
    pub trigger: String,
    /// State the entity was in before the trigger fired
    pub source_state: String,
    /// State the trigger moved the entity to
    pub dest_state: String,
    /// Who requested the transition
    pub actor_id: u64,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    /// New record with a fresh id, stamped now.
    pub fn new(
        target: EntityRef<'_>,
        trigger: &str,
        source_state: &str,
        dest_state: &str,
        actor_id: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            object_id: target.object_id,
            object_type: target.type_name.to_string(),
            trigger: trigger.to_string(),
            source_state: source_state.to_string(),
            dest_state: dest_state.to_string(),
            actor_id,
            created_at: Utc::now(),
        }
    }

    /// Whether this record belongs to `target`.
    pub fn is_about(&self, target: &EntityRef<'_>) -> bool {
        self.object_id == target.object_id && self.object_type == target.type_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u64) -> EntityRef<'static> {
        EntityRef {
            type_name: "Order",
            object_id: id,
        }
    }

    #[test]
    fn new_captures_transition() {
        let before = Utc::now();
        let record = AuditRecord::new(order(9), "pay", "Created", "Paid", 7);

        assert_eq!(record.object_id, 9);
        assert_eq!(record.object_type, "Order");
        assert_eq!(record.trigger, "pay");
        assert_eq!(record.source_state, "Created");
        assert_eq!(record.dest_state, "Paid");
        assert_eq!(record.actor_id, 7);
        assert!(record.created_at >= before);
    }

    #[test]
    fn ids_are_unique() {
        let a = AuditRecord::new(order(1), "pay", "Created", "Paid", 1);
        let b = AuditRecord::new(order(1), "pay", "Created", "Paid", 1);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn is_about_matches_id_and_type() {
        let record = AuditRecord::new(order(1), "pay", "Created", "Paid", 1);

        assert!(record.is_about(&order(1)));
        assert!(!record.is_about(&order(2)));
        assert!(!record.is_about(&EntityRef {
            type_name: "Invoice",
            object_id: 1,
        }));
    }

    #[test]
    fn record_serializes_with_column_names() {
        let record = AuditRecord::new(order(3), "ship", "Paid", "Shipped", 5);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["object_id"], 3);
        assert_eq!(json["object_type"], "Order");
        assert_eq!(json["source_state"], "Paid");
        assert_eq!(json["dest_state"], "Shipped");

        let back: AuditRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
