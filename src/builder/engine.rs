//! Builder for transition engines.

use crate::builder::error::BuildError;
use crate::config::EngineConfig;
use crate::engine::TransitionEngine;
use crate::translate::{Passthrough, Translator};
use std::sync::Arc;

/// Builder for [`TransitionEngine`].
///
/// Without an explicit translator, labels are the raw translation keys.
pub struct EngineBuilder {
    translator: Option<Arc<dyn Translator>>,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            translator: None,
            config: EngineConfig::default(),
        }
    }

    /// Set the translation boundary.
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    /// Share an existing translator between engines.
    pub fn shared_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the audit table name.
    pub fn audit_table(mut self, table: impl Into<String>) -> Self {
        self.config.audit_table = table.into();
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> Result<TransitionEngine, BuildError> {
        self.config.validate()?;
        let translator = self
            .translator
            .unwrap_or_else(|| Arc::new(Passthrough));
        Ok(TransitionEngine::with_parts(translator, self.config))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::translate::Catalog;

    #[test]
    fn defaults_build() {
        let engine = EngineBuilder::new().build().unwrap();

        assert_eq!(engine.config(), &EngineConfig::default());
        assert_eq!(engine.audit().table(), "state_machine_logs");
    }

    #[test]
    fn audit_table_override_reaches_logger() {
        let engine = EngineBuilder::new()
            .translator(Catalog::new())
            .audit_table("order_audit")
            .build()
            .unwrap();

        assert_eq!(engine.audit().table(), "order_audit");
        assert_eq!(engine.config().state_field, "state");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = EngineBuilder::new().audit_table("").build();

        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::InvalidIdentifier {
                field: "audit_table",
                ..
            }))
        ));
    }

    #[test]
    fn translator_can_be_shared() {
        let shared: Arc<dyn Translator> = Arc::new(|key: &str| format!("<{key}>"));
        let first = EngineBuilder::new()
            .shared_translator(Arc::clone(&shared))
            .build()
            .unwrap();
        let second = EngineBuilder::new()
            .shared_translator(shared)
            .audit_table("other_logs")
            .build()
            .unwrap();

        assert_eq!(first.config().audit_table, "state_machine_logs");
        assert_eq!(second.config().audit_table, "other_logs");
    }
}
