//! The state-capability contract implemented by persisted entities.
//!
//! An entity participates in the engine by implementing [`Stateful`]: it
//! names its type, exposes a stable object id, reads and writes its single
//! state field, and points at the [`StateDescriptor`] shared by every
//! instance of the type.

use super::descriptor::StateDescriptor;
use super::trigger::TriggerDefinition;
use crate::engine::{Bound, TransitionEngine};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Conventional initial state name, matching the persisted column default.
///
/// Descriptors are free to start elsewhere; see
/// [`DescriptorBuilder::initial`](crate::builder::DescriptorBuilder::initial).
pub const INITIAL_STATE: &str = "INITIALIZED";

/// Trait for entities whose state is driven by triggers.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::{StateDescriptor, StateSlot, Stateful};
/// use statekeeper::builder::TriggerBuilder;
/// use std::sync::OnceLock;
///
/// struct Ticket {
///     id: u64,
///     state: StateSlot,
/// }
///
/// impl Stateful for Ticket {
///     const TYPE_NAME: &'static str = "Ticket";
///     type Args = ();
///
///     fn descriptor() -> &'static StateDescriptor<()> {
///         static DESCRIPTOR: OnceLock<StateDescriptor<()>> = OnceLock::new();
///         DESCRIPTOR.get_or_init(|| {
///             StateDescriptor::builder()
///                 .initial("INITIALIZED")
///                 .states(["INITIALIZED", "Open", "Closed"])
///                 .trigger(TriggerBuilder::new("open").from("INITIALIZED").to("Open"))
///                 .trigger(TriggerBuilder::new("close").from("Open").to("Closed"))
///                 .build()
///                 .expect("ticket descriptor is valid")
///         })
///     }
///
///     fn object_id(&self) -> u64 {
///         self.id
///     }
///
///     fn state(&self) -> &str {
///         self.state.get()
///     }
///
///     fn set_state(&mut self, state: &str) {
///         self.state.set(state);
///     }
/// }
///
/// let ticket = Ticket { id: 1, state: StateSlot::initial::<Ticket>() };
/// assert_eq!(ticket.state(), "INITIALIZED");
/// assert_eq!(Ticket::initial_state(), "INITIALIZED");
/// assert!(Ticket::valid_states().contains("Closed"));
/// ```
pub trait Stateful: Sized {
    /// Entity type name used in translation keys and audit records.
    const TYPE_NAME: &'static str;

    /// Arguments handed to guards and hooks when a trigger fires.
    type Args: 'static;

    /// The descriptor shared by every instance of this type.
    fn descriptor() -> &'static StateDescriptor<Self::Args>;

    /// Unique identifier of this entity within its type.
    fn object_id(&self) -> u64;

    /// Current state name.
    fn state(&self) -> &str;

    /// Overwrite the in-memory state.
    ///
    /// Only the engine should call this, and only with a destination drawn
    /// from the descriptor.
    fn set_state(&mut self, state: &str);

    /// State new entities of this type start in.
    fn initial_state() -> &'static str {
        Self::descriptor().initial_state()
    }

    /// The declared state names of this type.
    fn valid_states() -> &'static BTreeSet<String> {
        Self::descriptor().valid_states()
    }

    /// The trigger table of this type, keyed by trigger name.
    fn triggers() -> &'static BTreeMap<String, TriggerDefinition<Self::Args>> {
        Self::descriptor().triggers()
    }

    /// Pair this entity with an engine.
    ///
    /// Call once per loaded entity; this is the explicit replacement for a
    /// load callback.
    fn bind(self, engine: &TransitionEngine) -> Bound<'_, Self> {
        engine.bind(self)
    }
}

/// Identifies one persisted entity: its type name and object id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityRef<'a> {
    pub type_name: &'a str,
    pub object_id: u64,
}

impl EntityRef<'static> {
    /// Reference to a [`Stateful`] entity.
    pub fn of<E: Stateful>(entity: &E) -> Self {
        EntityRef {
            type_name: E::TYPE_NAME,
            object_id: entity.object_id(),
        }
    }
}

impl fmt::Display for EntityRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.object_id)
    }
}

/// Ready-made state field for entity structs.
///
/// Serializes transparently as the state name. New entities should start
/// from [`StateSlot::initial`] so they begin in a declared state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSlot(String);

impl StateSlot {
    pub fn new(state: impl Into<String>) -> Self {
        Self(state.into())
    }

    /// Slot holding the initial state of entity type `E`.
    pub fn initial<E: Stateful>() -> Self {
        Self::new(E::initial_state())
    }

    pub fn get(&self) -> &str {
        &self.0
    }

    pub fn set(&mut self, state: &str) {
        self.0.clear();
        self.0.push_str(state);
    }
}

impl fmt::Display for StateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
