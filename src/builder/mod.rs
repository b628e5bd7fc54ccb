//! Builder API for triggers, descriptors, and engines.
//!
//! Descriptors are validated when built, so a descriptor that exists only
//! ever names declared states.
//!
//! # Example
//!
//! ```
//! use statekeeper::builder::TriggerBuilder;
//! use statekeeper::core::StateDescriptor;
//!
//! struct Payment {
//!     amount: u64,
//! }
//!
//! let descriptor = StateDescriptor::<Payment>::builder()
//!     .initial("Created")
//!     .states(["Created", "Paid", "Shipped"])
//!     .trigger(
//!         TriggerBuilder::new("pay")
//!             .from("Created")
//!             .to("Paid")
//!             .when(|_tx, args: &Payment| args.amount > 0),
//!     )
//!     .trigger(TriggerBuilder::new("ship").from("Paid").to("Shipped"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(descriptor.triggers().len(), 2);
//! ```

mod descriptor;
mod engine;
mod error;
mod transition;

pub use descriptor::DescriptorBuilder;
pub use engine::EngineBuilder;
pub use error::{BuildError, DescriptorViolation};
pub use transition::TriggerBuilder;
