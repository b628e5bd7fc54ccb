//! Build errors for triggers, descriptors, and engines.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building triggers, descriptors, and engines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Trigger name is empty. Pass a name to TriggerBuilder::new")]
    EmptyTriggerName,

    #[error("Trigger '{trigger}' has no source states. Call .from(state)")]
    MissingSourceStates { trigger: String },

    #[error("Trigger '{trigger}' has no destination state. Call .to(state)")]
    MissingDestState { trigger: String },

    #[error("Invalid state descriptor: {}", join_violations(.0))]
    InvalidDescriptor(Vec<DescriptorViolation>),

    #[error("Invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A single problem found while validating a state descriptor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorViolation {
    #[error("no states declared")]
    NoStates,

    #[error("no initial state. Call .initial(state)")]
    MissingInitialState,

    #[error("initial state '{state}' is not declared")]
    UndeclaredInitial { state: String },

    #[error("malformed trigger: {reason}")]
    MalformedTrigger { reason: String },

    #[error("trigger '{trigger}' declared twice")]
    DuplicateTrigger { trigger: String },

    #[error("trigger '{trigger}' fires from undeclared state '{state}'")]
    UndeclaredSource { trigger: String, state: String },

    #[error("trigger '{trigger}' leads to undeclared state '{state}'")]
    UndeclaredDest { trigger: String, state: String },
}

fn join_violations(violations: &[DescriptorViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
