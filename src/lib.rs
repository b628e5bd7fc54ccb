//! Statekeeper: trigger-driven state machines for persisted entities
//!
//! An entity type declares its valid states and a table of named triggers.
//! Each trigger lists the states it may fire from, the state it leads to,
//! and optional guard, before, and after closures. The engine executes a
//! trigger through the caller's transaction, writing only the state column
//! and one audit record per executed transition.
//!
//! # Core Concepts
//!
//! - **Stateful**: the contract an entity type implements
//! - **StateDescriptor**: valid states plus the trigger table, validated when built
//! - **TransitionEngine**: `available_triggers`, `fire`, `translated_state`
//! - **Transaction**: the caller-owned handle every write goes through
//! - **AuditRecord**: immutable entry per executed transition
//!
//! A guard returning `false` is a silent no-op: `fire` returns `Ok(())` and
//! nothing changes.
//!
//! # Example
//!
//! ```rust
//! use statekeeper::builder::TriggerBuilder;
//! use statekeeper::core::{StateDescriptor, StateSlot, Stateful};
//! use statekeeper::store::MemoryStore;
//! use statekeeper::translate::Catalog;
//! use statekeeper::TransitionEngine;
//! use std::sync::OnceLock;
//!
//! struct Payment {
//!     amount: u64,
//! }
//!
//! struct Order {
//!     id: u64,
//!     state: StateSlot,
//! }
//!
//! impl Stateful for Order {
//!     const TYPE_NAME: &'static str = "Order";
//!     type Args = Payment;
//!
//!     fn descriptor() -> &'static StateDescriptor<Payment> {
//!         static DESCRIPTOR: OnceLock<StateDescriptor<Payment>> = OnceLock::new();
//!         DESCRIPTOR.get_or_init(|| {
//!             StateDescriptor::builder()
//!                 .initial("Created")
//!                 .states(["Created", "Paid", "Shipped"])
//!                 .trigger(
//!                     TriggerBuilder::new("pay")
//!                         .from("Created")
//!                         .to("Paid")
//!                         .when(|_tx, args: &Payment| args.amount > 0),
//!                 )
//!                 .trigger(TriggerBuilder::new("ship").from("Paid").to("Shipped"))
//!                 .build()
//!                 .expect("order descriptor is valid")
//!         })
//!     }
//!
//!     fn object_id(&self) -> u64 {
//!         self.id
//!     }
//!
//!     fn state(&self) -> &str {
//!         self.state.get()
//!     }
//!
//!     fn set_state(&mut self, state: &str) {
//!         self.state.set(state);
//!     }
//! }
//!
//! let engine = TransitionEngine::new(Catalog::new().with("Order:Paid", "Paid"));
//! let mut store = MemoryStore::new();
//!
//! let mut tx = store.begin();
//! engine.setup_schema(&mut tx).unwrap();
//! tx.commit();
//!
//! let mut order = Order { id: 1, state: StateSlot::new("Created") }.bind(&engine);
//!
//! let mut tx = store.begin();
//! order.fire(&mut tx, "pay", 7, &Payment { amount: 10 }).unwrap();
//! tx.commit();
//!
//! assert_eq!(order.translated_state(), "Paid");
//! assert_eq!(store.rows("state_machine_logs")[0].source_state, "Created");
//! ```

pub mod audit;
pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod store;
pub mod translate;

// Re-export commonly used types
pub use audit::{AuditRecord, AuditSchema};
pub use config::EngineConfig;
pub use crate::core::{StateDescriptor, StateSlot, Stateful, TriggerDefinition};
pub use engine::{AvailableTrigger, Bound, HookPhase, TransitionEngine, TransitionError};
pub use store::{MemoryStore, Transaction};
pub use translate::Translator;
