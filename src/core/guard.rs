//! Guard predicates and side-effecting hooks attached to triggers.
//!
//! Both take the caller's transactional handle and the entity type's
//! argument value. Guards answer whether a trigger fires at all; hooks run
//! immediately before or after the state mutation.

use crate::store::Transaction;
use std::error::Error as StdError;
use std::fmt;

/// Error type returned by before/after hooks.
pub type HookError = Box<dyn StdError + Send + Sync>;

/// Predicate that decides whether a trigger fires.
///
/// A guard returning `false` turns the trigger into a silent no-op.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::Guard;
/// use statekeeper::store::MemoryStore;
///
/// struct Payment {
///     amount: u64,
/// }
///
/// let positive = Guard::new(|_tx, args: &Payment| args.amount > 0);
///
/// let mut store = MemoryStore::new();
/// let mut tx = store.begin();
/// assert!(positive.check(&mut tx, &Payment { amount: 10 }));
/// assert!(!positive.check(&mut tx, &Payment { amount: 0 }));
/// ```
pub struct Guard<A> {
    predicate: Box<dyn Fn(&mut dyn Transaction, &A) -> bool + Send + Sync>,
}

impl<A> Guard<A> {
    /// Create a guard from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&mut dyn Transaction, &A) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the predicate.
    pub fn check(&self, tx: &mut dyn Transaction, args: &A) -> bool {
        (self.predicate)(tx, args)
    }
}

impl<A> fmt::Debug for Guard<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Side effect run before or after a state mutation.
pub struct Hook<A> {
    action: Box<dyn Fn(&mut dyn Transaction, &A) -> Result<(), HookError> + Send + Sync>,
}

impl<A> Hook<A> {
    /// Create a hook from a fallible closure.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut dyn Transaction, &A) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Hook {
            action: Box::new(action),
        }
    }

    /// Run the hook, returning its error untouched.
    pub fn run(&self, tx: &mut dyn Transaction, args: &A) -> Result<(), HookError> {
        (self.action)(tx, args)
    }
}

impl<A> fmt::Debug for Hook<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}
