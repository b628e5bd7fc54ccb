//! Engine configuration.
//!
//! Names the persisted state column and the audit table. Both default to the
//! conventional names and can be loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default name of the persisted state column.
pub const DEFAULT_STATE_FIELD: &str = "state";

/// Default name of the audit table.
pub const DEFAULT_AUDIT_TABLE: &str = "state_machine_logs";

/// Errors produced while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse engine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration field '{field}' must be a non-empty identifier, got '{value}'")]
    InvalidIdentifier { field: &'static str, value: String },
}

/// Settings shared by every transition an engine executes.
///
/// # Example
///
/// ```rust
/// use statekeeper::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "audit_table": "order_transitions" }"#).unwrap();
/// assert_eq!(config.state_field, "state");
/// assert_eq!(config.audit_table, "order_transitions");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Column written when a trigger changes an entity's state.
    pub state_field: String,

    /// Table receiving one audit record per executed transition.
    pub audit_table: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            state_field: DEFAULT_STATE_FIELD.to_string(),
            audit_table: DEFAULT_AUDIT_TABLE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document. Missing fields take defaults;
    /// unknown fields are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both names are usable as column/table identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_identifier("state_field", &self.state_field)?;
        check_identifier("audit_table", &self.audit_table)
    }
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}
