//! Entities paired with the engine that drives them.

use super::error::TransitionError;
use super::machine::{AvailableTrigger, TransitionEngine};
use crate::core::Stateful;
use crate::store::Transaction;
use std::ops::Deref;

/// An entity bound to a [`TransitionEngine`].
///
/// Produced by [`TransitionEngine::bind`] or [`Stateful::bind`] right after
/// the entity is loaded. Dereferences to the entity for reads; writes to the
/// state go through [`fire`](Self::fire).
///
/// # Example
///
/// ```rust
/// # use statekeeper::core::{StateDescriptor, StateSlot, Stateful};
/// # use statekeeper::builder::TriggerBuilder;
/// # use std::sync::OnceLock;
/// # struct Door { id: u64, state: StateSlot }
/// # impl Stateful for Door {
/// #     const TYPE_NAME: &'static str = "Door";
/// #     type Args = ();
/// #     fn descriptor() -> &'static StateDescriptor<()> {
/// #         static D: OnceLock<StateDescriptor<()>> = OnceLock::new();
/// #         D.get_or_init(|| StateDescriptor::builder()
/// #             .initial("INITIALIZED")
/// #             .states(["INITIALIZED", "Open"])
/// #             .trigger(TriggerBuilder::new("open").from("INITIALIZED").to("Open"))
/// #             .build()
/// #             .unwrap())
/// #     }
/// #     fn object_id(&self) -> u64 { self.id }
/// #     fn state(&self) -> &str { self.state.get() }
/// #     fn set_state(&mut self, state: &str) { self.state.set(state) }
/// # }
/// use statekeeper::store::MemoryStore;
/// use statekeeper::translate::Passthrough;
/// use statekeeper::TransitionEngine;
///
/// let engine = TransitionEngine::new(Passthrough);
/// let mut store = MemoryStore::new();
///
/// let mut tx = store.begin();
/// engine.setup_schema(&mut tx).unwrap();
///
/// let mut door = Door { id: 1, state: StateSlot::initial::<Door>() }.bind(&engine);
/// door.fire(&mut tx, "open", 99, &()).unwrap();
/// tx.commit();
///
/// assert_eq!(door.state(), "Open");
/// assert_eq!(store.rows("state_machine_logs").len(), 1);
/// ```
#[derive(Debug)]
pub struct Bound<'e, E> {
    engine: &'e TransitionEngine,
    entity: E,
}

impl<'e, E: Stateful> Bound<'e, E> {
    pub(crate) fn new(engine: &'e TransitionEngine, entity: E) -> Self {
        Self { engine, entity }
    }

    pub fn engine(&self) -> &'e TransitionEngine {
        self.engine
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    /// Mutable access to the entity's own fields.
    ///
    /// Changing the state through this bypasses guards, hooks, and audit.
    pub fn entity_mut(&mut self) -> &mut E {
        &mut self.entity
    }

    /// Release the entity from the engine.
    pub fn into_inner(self) -> E {
        self.entity
    }

    /// See [`TransitionEngine::available_triggers`].
    pub fn available_triggers(&self) -> Vec<AvailableTrigger> {
        self.engine.available_triggers(&self.entity)
    }

    /// See [`TransitionEngine::translated_state`].
    pub fn translated_state(&self) -> String {
        self.engine.translated_state(&self.entity)
    }

    /// See [`TransitionEngine::fire`].
    pub fn fire(
        &mut self,
        tx: &mut dyn Transaction,
        trigger: &str,
        actor_id: u64,
        args: &E::Args,
    ) -> Result<(), TransitionError> {
        self.engine
            .fire(tx, &mut self.entity, trigger, actor_id, args)
    }
}

impl<E> Deref for Bound<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.entity
    }
}
