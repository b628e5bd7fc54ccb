//! Builder for constructing trigger definitions.

use crate::builder::error::BuildError;
use crate::core::{Guard, Hook, HookError, TriggerDefinition};
use crate::store::Transaction;
use std::collections::BTreeSet;

/// Builder for trigger definitions with a fluent API.
pub struct TriggerBuilder<A> {
    name: String,
    sources: BTreeSet<String>,
    dest: Option<String>,
    guard: Option<Guard<A>>,
    before: Option<Hook<A>>,
    after: Option<Hook<A>>,
}

impl<A> TriggerBuilder<A> {
    /// Create a builder for the trigger called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: BTreeSet::new(),
            dest: None,
            guard: None,
            before: None,
            after: None,
        }
    }

    /// Add a source state (at least one is required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.sources.insert(state.into());
        self
    }

    /// Add several source states.
    pub fn from_any<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.dest = Some(state.into());
        self
    }

    /// Attach a prebuilt guard (optional).
    pub fn guard(mut self, guard: Guard<A>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Attach a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&mut dyn Transaction, &A) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Run `action` before the state changes (optional).
    pub fn before<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut dyn Transaction, &A) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.before = Some(Hook::new(action));
        self
    }

    /// Run `action` after the state has been persisted (optional).
    pub fn after<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut dyn Transaction, &A) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.after = Some(Hook::new(action));
        self
    }

    /// Build the trigger definition.
    pub fn build(self) -> Result<TriggerDefinition<A>, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyTriggerName);
        }
        if self.sources.is_empty() {
            return Err(BuildError::MissingSourceStates { trigger: self.name });
        }
        let dest = self
            .dest
            .ok_or_else(|| BuildError::MissingDestState {
                trigger: self.name.clone(),
            })?;

        Ok(TriggerDefinition {
            name: self.name,
            sources: self.sources,
            dest,
            guard: self.guard,
            before: self.before,
            after: self.after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn builder_requires_destination() {
        let result = TriggerBuilder::<()>::new("pay").from("Created").build();

        assert!(matches!(
            result,
            Err(BuildError::MissingDestState { ref trigger }) if trigger == "pay"
        ));
    }

    #[test]
    fn builder_requires_source_states() {
        let result = TriggerBuilder::<()>::new("pay").to("Paid").build();

        assert!(matches!(result, Err(BuildError::MissingSourceStates { .. })));
    }

    #[test]
    fn builder_rejects_blank_name() {
        let result = TriggerBuilder::<()>::new("  ")
            .from("Created")
            .to("Paid")
            .build();

        assert!(matches!(result, Err(BuildError::EmptyTriggerName)));
    }

    #[test]
    fn from_accumulates_sources() {
        let trigger = TriggerBuilder::<()>::new("cancel")
            .from("Created")
            .from_any(["Paid", "Created"])
            .to("Cancelled")
            .build()
            .unwrap();

        let sources: Vec<&str> = trigger.sources().iter().map(String::as_str).collect();
        assert_eq!(sources, vec!["Created", "Paid"]);
    }

    #[test]
    fn to_overrides_previous_destination() {
        let trigger = TriggerBuilder::<()>::new("pay")
            .from("Created")
            .to("Pending")
            .to("Paid")
            .build()
            .unwrap();

        assert_eq!(trigger.dest(), "Paid");
    }

    #[test]
    fn fluent_api_attaches_closures() {
        let trigger = TriggerBuilder::<i64>::new("pay")
            .from("Created")
            .to("Paid")
            .when(|_tx, amount| *amount > 0)
            .before(|_tx, _amount| Ok(()))
            .after(|_tx, _amount| Err("notify failed".into()))
            .build()
            .unwrap();

        let mut store = MemoryStore::new();
        let mut tx = store.begin();

        let guard = trigger.guard().unwrap();
        assert!(guard.check(&mut tx, &10));
        assert!(!guard.check(&mut tx, &0));
        assert!(trigger.before().unwrap().run(&mut tx, &10).is_ok());
        assert!(trigger.after().unwrap().run(&mut tx, &10).is_err());
    }
}
