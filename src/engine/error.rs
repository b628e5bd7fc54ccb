//! Errors returned by the transition engine.

use crate::core::HookError;
use crate::store::StoreError;
use std::fmt;
use thiserror::Error;

/// Which hook failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookPhase {
    /// Ran before the state changed; nothing was mutated.
    Before,
    /// Ran after the state was persisted; no audit record was written.
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Which write through the transactional handle failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistOp {
    StateUpdate,
    AuditInsert,
    SchemaSetup,
}

impl fmt::Display for PersistOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateUpdate => f.write_str("state update"),
            Self::AuditInsert => f.write_str("audit insert"),
            Self::SchemaSetup => f.write_str("audit schema setup"),
        }
    }
}

/// Errors that can occur while firing a trigger.
///
/// A guard returning `false` is not an error: `fire` returns `Ok(())` and
/// leaves the entity untouched.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Unknown trigger '{trigger}' for {type_name}")]
    UnknownTrigger { type_name: String, trigger: String },

    #[error("Cannot fire trigger '{trigger}' from current state '{current}'")]
    InvalidTransition { trigger: String, current: String },

    #[error("The {phase} hook of trigger '{trigger}' failed: {source}")]
    HookFailure {
        phase: HookPhase,
        trigger: String,
        #[source]
        source: HookError,
    },

    #[error("Persistence failure during {op}: {source}")]
    PersistenceFailure {
        op: PersistOp,
        #[source]
        source: StoreError,
    },
}

impl TransitionError {
    pub(crate) fn hook(phase: HookPhase, trigger: &str, source: HookError) -> Self {
        Self::HookFailure {
            phase,
            trigger: trigger.to_string(),
            source,
        }
    }

    pub(crate) fn persistence(op: PersistOp, source: StoreError) -> Self {
        Self::PersistenceFailure { op, source }
    }

    /// The hook phase, for hook failures.
    pub fn phase(&self) -> Option<HookPhase> {
        match self {
            Self::HookFailure { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Whether the failed call left the entity and the store untouched.
    ///
    /// False for after-hook failures and for persistence failures, which
    /// happen once the in-memory state has already changed.
    pub fn is_side_effect_free(&self) -> bool {
        match self {
            Self::UnknownTrigger { .. } | Self::InvalidTransition { .. } => true,
            Self::HookFailure { phase, .. } => *phase == HookPhase::Before,
            Self::PersistenceFailure { op, .. } => *op == PersistOp::SchemaSetup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn hook_failure_names_phase_and_keeps_source() {
        let err = TransitionError::hook(HookPhase::Before, "pay", "card declined".into());

        assert_eq!(
            err.to_string(),
            "The before hook of trigger 'pay' failed: card declined"
        );
        assert_eq!(err.phase(), Some(HookPhase::Before));
        assert_eq!(err.source().unwrap().to_string(), "card declined");
        assert!(err.is_side_effect_free());
    }

    #[test]
    fn after_hook_failure_is_not_side_effect_free() {
        let err = TransitionError::hook(HookPhase::After, "pay", "mail bounced".into());
        assert_eq!(err.phase(), Some(HookPhase::After));
        assert!(!err.is_side_effect_free());
    }

    #[test]
    fn validation_errors_have_no_phase() {
        let unknown = TransitionError::UnknownTrigger {
            type_name: "Order".to_string(),
            trigger: "refund".to_string(),
        };
        let invalid = TransitionError::InvalidTransition {
            trigger: "pay".to_string(),
            current: "Shipped".to_string(),
        };

        assert_eq!(unknown.phase(), None);
        assert!(unknown.is_side_effect_free());
        assert_eq!(
            invalid.to_string(),
            "Cannot fire trigger 'pay' from current state 'Shipped'"
        );
    }

    #[test]
    fn persistence_failure_names_operation() {
        let err = TransitionError::persistence(PersistOp::StateUpdate, "connection reset".into());
        assert_eq!(
            err.to_string(),
            "Persistence failure during state update: connection reset"
        );
        assert!(!err.is_side_effect_free());
    }
}
