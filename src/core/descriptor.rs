//! Per-type state tables.

use super::trigger::TriggerDefinition;
use crate::builder::DescriptorBuilder;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The valid states and trigger table of one entity type, plus the state
/// its entities start in.
///
/// The initial state and every trigger's sources and destination are members
/// of the valid state set; [`DescriptorBuilder::build`] refuses anything else. Triggers are
/// kept in a `BTreeMap`, so iteration is ordered by trigger name.
pub struct StateDescriptor<A> {
    pub(crate) initial: String,
    pub(crate) states: BTreeSet<String>,
    pub(crate) triggers: BTreeMap<String, TriggerDefinition<A>>,
}

impl<A> StateDescriptor<A> {
    /// Start building a descriptor.
    pub fn builder() -> DescriptorBuilder<A> {
        DescriptorBuilder::new()
    }

    /// State new entities of this type start in.
    pub fn initial_state(&self) -> &str {
        &self.initial
    }

    pub fn valid_states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn triggers(&self) -> &BTreeMap<String, TriggerDefinition<A>> {
        &self.triggers
    }

    pub fn is_valid_state(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Look up a trigger by name.
    pub fn trigger(&self, name: &str) -> Option<&TriggerDefinition<A>> {
        self.triggers.get(name)
    }

    /// Triggers that may fire from `state`, ordered by name.
    pub fn available_from<'a>(
        &'a self,
        state: &'a str,
    ) -> impl Iterator<Item = &'a TriggerDefinition<A>> + 'a {
        self.triggers.values().filter(move |t| t.accepts(state))
    }
}

impl<A> fmt::Debug for StateDescriptor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("initial", &self.initial)
            .field("states", &self.states)
            .field("triggers", &self.triggers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TriggerBuilder;

    fn order_descriptor() -> StateDescriptor<()> {
        StateDescriptor::builder()
            .initial("Created")
            .states(["Created", "Paid", "Shipped", "Cancelled"])
            .trigger(TriggerBuilder::new("pay").from("Created").to("Paid"))
            .trigger(TriggerBuilder::new("ship").from("Paid").to("Shipped"))
            .trigger(
                TriggerBuilder::new("cancel")
                    .from_any(["Created", "Paid"])
                    .to("Cancelled"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn available_from_is_sorted_by_name() {
        let descriptor = order_descriptor();

        let names: Vec<&str> = descriptor
            .available_from("Created")
            .map(|t| t.name())
            .collect();
        assert_eq!(names, vec!["cancel", "pay"]);

        let names: Vec<&str> = descriptor.available_from("Paid").map(|t| t.name()).collect();
        assert_eq!(names, vec!["cancel", "ship"]);
    }

    #[test]
    fn terminal_state_has_no_triggers() {
        let descriptor = order_descriptor();
        assert_eq!(descriptor.available_from("Shipped").count(), 0);
        assert_eq!(descriptor.available_from("Unknown").count(), 0);
    }

    #[test]
    fn lookup_by_name() {
        let descriptor = order_descriptor();

        assert_eq!(descriptor.trigger("ship").map(|t| t.dest()), Some("Shipped"));
        assert!(descriptor.trigger("refund").is_none());
    }

    #[test]
    fn valid_state_membership() {
        let descriptor = order_descriptor();

        assert!(descriptor.is_valid_state("Paid"));
        assert!(descriptor.is_valid_state(descriptor.initial_state()));
        assert!(!descriptor.is_valid_state("Refunded"));
        assert_eq!(descriptor.valid_states().len(), 4);
    }
}
