//! Builder for per-type state descriptors.
//!
//! Validation uses Stillwater's `Validation` so that every problem in a
//! descriptor is reported at once instead of one per build attempt.

use crate::builder::error::{BuildError, DescriptorViolation};
use crate::builder::transition::TriggerBuilder;
use crate::core::{StateDescriptor, TriggerDefinition};
use std::collections::{BTreeMap, BTreeSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type DescriptorCheck = Validation<(), NonEmptyVec<DescriptorViolation>>;

/// Builder for [`StateDescriptor`].
pub struct DescriptorBuilder<A> {
    initial: Option<String>,
    states: BTreeSet<String>,
    triggers: Vec<Result<TriggerDefinition<A>, BuildError>>,
}

impl<A> DescriptorBuilder<A> {
    pub fn new() -> Self {
        Self {
            initial: None,
            states: BTreeSet::new(),
            triggers: Vec::new(),
        }
    }

    /// Set the state new entities start in (required). It must also be
    /// declared with [`state`](Self::state) or [`states`](Self::states).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare one valid state.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.states.insert(state.into());
        self
    }

    /// Declare several valid states.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add a trigger. Builder errors surface from [`build`](Self::build).
    pub fn trigger(mut self, builder: TriggerBuilder<A>) -> Self {
        self.triggers.push(builder.build());
        self
    }

    /// Add a prebuilt trigger definition.
    pub fn add_trigger(mut self, definition: TriggerDefinition<A>) -> Self {
        self.triggers.push(Ok(definition));
        self
    }

    /// Validate and build the descriptor.
    ///
    /// Fails with [`BuildError::InvalidDescriptor`] listing every violation
    /// found: no states, a missing or undeclared initial state, malformed or
    /// duplicate triggers, and source or destination states that were never
    /// declared.
    pub fn build(self) -> Result<StateDescriptor<A>, BuildError> {
        let DescriptorBuilder {
            initial,
            states,
            triggers: pending,
        } = self;

        let mut checks: Vec<DescriptorCheck> = Vec::new();
        if states.is_empty() {
            checks.push(Validation::fail(DescriptorViolation::NoStates));
        }

        match &initial {
            None => checks.push(Validation::fail(DescriptorViolation::MissingInitialState)),
            Some(state) if !states.contains(state) => {
                checks.push(Validation::fail(DescriptorViolation::UndeclaredInitial {
                    state: state.clone(),
                }))
            }
            Some(_) => {}
        }

        let mut triggers = BTreeMap::new();
        for built in pending {
            let definition = match built {
                Ok(definition) => definition,
                Err(err) => {
                    checks.push(Validation::fail(DescriptorViolation::MalformedTrigger {
                        reason: err.to_string(),
                    }));
                    continue;
                }
            };

            checks.extend(undeclared_states(&states, &definition));

            if triggers.contains_key(definition.name()) {
                checks.push(Validation::fail(DescriptorViolation::DuplicateTrigger {
                    trigger: definition.name().to_string(),
                }));
            } else {
                triggers.insert(definition.name().to_string(), definition);
            }
        }

        match (Validation::all_vec(checks), initial) {
            (Validation::Success(_), Some(initial)) => Ok(StateDescriptor {
                initial,
                states,
                triggers,
            }),
            (Validation::Success(_), None) => Err(BuildError::InvalidDescriptor(vec![
                DescriptorViolation::MissingInitialState,
            ])),
            (Validation::Failure(violations), _) => Err(BuildError::InvalidDescriptor(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

impl<A> Default for DescriptorBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn undeclared_states<A>(
    states: &BTreeSet<String>,
    definition: &TriggerDefinition<A>,
) -> Vec<DescriptorCheck> {
    let mut checks: Vec<DescriptorCheck> = definition
        .sources()
        .iter()
        .filter(|source| !states.contains(source.as_str()))
        .map(|source| {
            Validation::fail(DescriptorViolation::UndeclaredSource {
                trigger: definition.name().to_string(),
                state: source.clone(),
            })
        })
        .collect();

    if !states.contains(definition.dest()) {
        checks.push(Validation::fail(DescriptorViolation::UndeclaredDest {
            trigger: definition.name().to_string(),
            state: definition.dest().to_string(),
        }));
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(result: Result<StateDescriptor<()>, BuildError>) -> Vec<DescriptorViolation> {
        match result {
            Err(BuildError::InvalidDescriptor(violations)) => violations,
            Err(other) => panic!("expected InvalidDescriptor, got {other}"),
            Ok(_) => panic!("expected InvalidDescriptor, got a descriptor"),
        }
    }

    #[test]
    fn valid_descriptor_builds() {
        let descriptor = DescriptorBuilder::<()>::new()
            .initial("Created")
            .states(["Created", "Paid"])
            .trigger(TriggerBuilder::new("pay").from("Created").to("Paid"))
            .build()
            .unwrap();

        assert_eq!(descriptor.triggers().len(), 1);
        assert!(descriptor.is_valid_state("Created"));
        assert_eq!(descriptor.initial_state(), "Created");
    }

    #[test]
    fn descriptor_without_states_is_rejected() {
        let found = violations(DescriptorBuilder::new().initial("Created").build());
        assert_eq!(
            found,
            vec![
                DescriptorViolation::NoStates,
                DescriptorViolation::UndeclaredInitial {
                    state: "Created".to_string()
                },
            ]
        );
    }

    #[test]
    fn descriptor_without_initial_state_is_rejected() {
        let found = violations(
            DescriptorBuilder::new()
                .states(["Created", "Paid", "Shipped"])
                .trigger(TriggerBuilder::new("pay").from("Created").to("Paid"))
                .build(),
        );
        assert_eq!(found, vec![DescriptorViolation::MissingInitialState]);
    }

    #[test]
    fn initial_state_must_be_declared() {
        let found = violations(
            DescriptorBuilder::new()
                .initial("INITIALIZED")
                .states(["Created", "Paid", "Shipped"])
                .build(),
        );
        assert_eq!(
            found,
            vec![DescriptorViolation::UndeclaredInitial {
                state: "INITIALIZED".to_string()
            }]
        );
    }

    #[test]
    fn descriptor_without_triggers_is_allowed() {
        let descriptor = DescriptorBuilder::<()>::new()
            .initial("Only")
            .state("Only")
            .build()
            .unwrap();
        assert!(descriptor.triggers().is_empty());
    }

    #[test]
    fn build_accumulates_all_violations() {
        let found = violations(
            DescriptorBuilder::new()
                .initial("Created")
                .states(["Created", "Paid"])
                .trigger(TriggerBuilder::new("pay").from("Draft").to("Settled"))
                .trigger(TriggerBuilder::new("ship").from("Paid"))
                .trigger(TriggerBuilder::new("cancel").from("Created").to("Paid"))
                .trigger(TriggerBuilder::new("cancel").from("Paid").to("Created"))
                .build(),
        );

        assert_eq!(found.len(), 4);
        assert!(found.contains(&DescriptorViolation::UndeclaredSource {
            trigger: "pay".to_string(),
            state: "Draft".to_string(),
        }));
        assert!(found.contains(&DescriptorViolation::UndeclaredDest {
            trigger: "pay".to_string(),
            state: "Settled".to_string(),
        }));
        assert!(found
            .iter()
            .any(|v| matches!(v, DescriptorViolation::MalformedTrigger { reason } if reason.contains("ship"))));
        assert!(found.contains(&DescriptorViolation::DuplicateTrigger {
            trigger: "cancel".to_string(),
        }));
    }

    #[test]
    fn error_message_lists_every_violation() {
        let err = DescriptorBuilder::<()>::new()
            .initial("Created")
            .state("Created")
            .trigger(TriggerBuilder::new("pay").from("Created").to("Paid"))
            .trigger(TriggerBuilder::new("void").from("Voided").to("Created"))
            .build()
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("'pay' leads to undeclared state 'Paid'"));
        assert!(message.contains("'void' fires from undeclared state 'Voided'"));
    }
}
