//! Core types of the transition engine.
//!
//! - [`Stateful`]: the contract a persisted entity implements
//! - [`StateDescriptor`]: valid states plus the trigger table of a type
//! - [`TriggerDefinition`]: one named transition
//! - [`Guard`] and [`Hook`]: typed closures attached to triggers

mod descriptor;
mod guard;
mod state;
mod trigger;

pub use descriptor::StateDescriptor;
pub use guard::{Guard, Hook, HookError};
pub use state::{EntityRef, StateSlot, Stateful, INITIAL_STATE};
pub use trigger::TriggerDefinition;
