//! Trigger definitions: named transitions with source states, a single
//! destination, and optional guard/before/after closures.

use super::guard::{Guard, Hook};
use std::collections::BTreeSet;
use std::fmt;

/// A declared trigger of one entity type.
///
/// Built with [`TriggerBuilder`](crate::builder::TriggerBuilder) and owned
/// by a [`StateDescriptor`](super::StateDescriptor). Immutable once built.
pub struct TriggerDefinition<A> {
    pub(crate) name: String,
    pub(crate) sources: BTreeSet<String>,
    pub(crate) dest: String,
    pub(crate) guard: Option<Guard<A>>,
    pub(crate) before: Option<Hook<A>>,
    pub(crate) after: Option<Hook<A>>,
}

impl<A> TriggerDefinition<A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// States this trigger may fire from.
    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    /// State the entity ends up in.
    pub fn dest(&self) -> &str {
        &self.dest
    }

    pub fn guard(&self) -> Option<&Guard<A>> {
        self.guard.as_ref()
    }

    pub fn before(&self) -> Option<&Hook<A>> {
        self.before.as_ref()
    }

    pub fn after(&self) -> Option<&Hook<A>> {
        self.after.as_ref()
    }

    /// Whether `state` is one of this trigger's source states.
    ///
    /// Guards are not consulted here; they need a transaction and arguments.
    pub fn accepts(&self, state: &str) -> bool {
        self.sources.contains(state)
    }
}

impl<A> fmt::Debug for TriggerDefinition<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerDefinition")
            .field("name", &self.name)
            .field("sources", &self.sources)
            .field("dest", &self.dest)
            .field("guard", &self.guard.is_some())
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}
