//! The transition engine: trigger enumeration, execution, and labels.

use super::bound::Bound;
use super::error::{HookPhase, PersistOp, TransitionError};
use crate::audit::{AuditLogger, AuditRecord};
use crate::builder::EngineBuilder;
use crate::config::EngineConfig;
use crate::core::{EntityRef, Stateful};
use crate::store::Transaction;
use crate::translate::{translation_key, Translator};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A trigger that can fire from an entity's current state, with its label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailableTrigger {
    /// Trigger name as declared
    pub trigger: String,
    /// Translated display label
    pub label: String,
}

/// Executes triggers against [`Stateful`] entities.
///
/// The engine holds no per-entity state and can be shared between threads.
/// It never opens or commits transactions: `fire` is atomic only when the
/// caller runs it inside one transaction and commits once. Two concurrent
/// `fire` calls on the same entity are not serialized here.
pub struct TransitionEngine {
    translator: Arc<dyn Translator>,
    audit: AuditLogger,
    config: EngineConfig,
}

impl TransitionEngine {
    /// Engine with default configuration.
    pub fn new(translator: impl Translator + 'static) -> Self {
        Self::with_parts(Arc::new(translator), EngineConfig::default())
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn with_parts(translator: Arc<dyn Translator>, config: EngineConfig) -> Self {
        Self {
            translator,
            audit: AuditLogger::new(config.audit_table.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Create the audit table if it does not exist. Call once at startup.
    pub fn setup_schema(&self, tx: &mut dyn Transaction) -> Result<(), TransitionError> {
        self.audit.setup_schema(tx)
    }

    /// Pair a loaded entity with this engine.
    pub fn bind<E: Stateful>(&self, entity: E) -> Bound<'_, E> {
        Bound::new(self, entity)
    }

    /// Bind every entity of a batch load.
    pub fn bind_all<E: Stateful>(&self, entities: Vec<E>) -> Vec<Bound<'_, E>> {
        entities.into_iter().map(|e| self.bind(e)).collect()
    }

    /// Triggers whose source states contain the entity's current state,
    /// ordered by trigger name. Guards are not evaluated.
    pub fn available_triggers<E: Stateful>(&self, entity: &E) -> Vec<AvailableTrigger> {
        E::descriptor()
            .available_from(entity.state())
            .map(|definition| AvailableTrigger {
                trigger: definition.name().to_string(),
                label: self.label::<E>(definition.name()),
            })
            .collect()
    }

    /// Translated label of the entity's current state.
    pub fn translated_state<E: Stateful>(&self, entity: &E) -> String {
        self.label::<E>(entity.state())
    }

    /// Fire `trigger` on `entity`.
    ///
    /// In order: look the trigger up, check the current state is a source,
    /// evaluate the guard, run the before-hook, set the state, persist the
    /// state column, run the after-hook, append the audit record.
    ///
    /// A guard returning `false` makes this a no-op that still returns
    /// `Ok(())`. An after-hook failure is returned after the state column
    /// was written and before the audit record is appended; the caller's
    /// transaction decides whether that change survives.
    pub fn fire<E: Stateful>(
        &self,
        tx: &mut dyn Transaction,
        entity: &mut E,
        trigger: &str,
        actor_id: u64,
        args: &E::Args,
    ) -> Result<(), TransitionError> {
        let target = EntityRef::of(entity);
        let definition =
            E::descriptor()
                .trigger(trigger)
                .ok_or_else(|| TransitionError::UnknownTrigger {
                    type_name: E::TYPE_NAME.to_string(),
                    trigger: trigger.to_string(),
                })?;

        let source = entity.state().to_string();
        if !definition.accepts(&source) {
            return Err(TransitionError::InvalidTransition {
                trigger: trigger.to_string(),
                current: source,
            });
        }

        if let Some(guard) = definition.guard() {
            if !guard.check(tx, args) {
                debug!(entity = %target, trigger, state = %source, "guard rejected trigger");
                return Ok(());
            }
        }

        if let Some(before) = definition.before() {
            before
                .run(tx, args)
                .map_err(|err| TransitionError::hook(HookPhase::Before, trigger, err))?;
        }

        let dest = definition.dest();
        entity.set_state(dest);
        tx.update_field(&target, &self.config.state_field, dest)
            .map_err(|err| TransitionError::persistence(PersistOp::StateUpdate, err))?;

        if let Some(after) = definition.after() {
            if let Err(err) = after.run(tx, args) {
                warn!(
                    entity = %target,
                    trigger,
                    dest,
                    "after hook failed with state already written; no audit record"
                );
                return Err(TransitionError::hook(HookPhase::After, trigger, err));
            }
        }

        let record = AuditRecord::new(target, trigger, &source, dest, actor_id);
        self.audit.append(tx, &record)?;

        info!(
            entity = %target,
            trigger,
            from = %source,
            to = dest,
            actor_id,
            "transition executed"
        );
        Ok(())
    }

    fn label<E: Stateful>(&self, name: &str) -> String {
        self.translator
            .translate(&translation_key(E::TYPE_NAME, name))
    }
}

impl fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
