//! Transition execution.
//!
//! [`TransitionEngine`] validates, guards, and executes triggers declared by
//! a [`Stateful`](crate::core::Stateful) type, writing the state column and
//! an audit record through the caller's
//! [`Transaction`](crate::store::Transaction).
//!
//! Execution is synchronous and runs entirely on the caller's thread.

mod bound;
mod error;
mod machine;

pub use bound::Bound;
pub use error::{HookPhase, PersistOp, TransitionError};
pub use machine::{AvailableTrigger, TransitionEngine};
