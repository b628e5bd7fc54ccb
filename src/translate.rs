//! Label translation for states and triggers.
//!
//! Keys have the form `"<TypeName>:<StateOrTrigger>"`. The engine receives
//! its translator at construction; there is no process-wide catalog.

use std::collections::HashMap;

/// Maps a translation key to a display string.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Build the translation key for a state or trigger of `type_name`.
pub fn translation_key(type_name: &str, name: &str) -> String {
    format!("{type_name}:{name}")
}

/// Translator that returns the key unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl Translator for Passthrough {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// In-memory message catalog.
///
/// Keys without an entry translate to themselves, so a missing label shows
/// up as `Type:name` rather than an empty string.
///
/// # Example
///
/// ```rust
/// use statekeeper::translate::{Catalog, Translator};
///
/// let catalog = Catalog::new().with("Order:pay", "Pay order");
/// assert_eq!(catalog.translate("Order:pay"), "Pay order");
/// assert_eq!(catalog.translate("Order:ship"), "Order:ship");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one entry.
    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert(key, label);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.messages.insert(key.into(), label.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(key, label)| (key.into(), label.into()))
                .collect(),
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_type_and_name() {
        assert_eq!(translation_key("Order", "Paid"), "Order:Paid");
    }

    #[test]
    fn passthrough_returns_key() {
        assert_eq!(Passthrough.translate("Order:Paid"), "Order:Paid");
    }

    #[test]
    fn catalog_falls_back_to_key() {
        let catalog: Catalog = [("Order:Paid", "已支付")].into_iter().collect();

        assert_eq!(catalog.translate("Order:Paid"), "已支付");
        assert_eq!(catalog.translate("Order:Created"), "Order:Created");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn closures_are_translators() {
        let upper = |key: &str| key.to_uppercase();
        assert_eq!(upper.translate("order:pay"), "ORDER:PAY");
    }

    #[test]
    fn insert_replaces_existing_label() {
        let mut catalog = Catalog::new().with("Order:pay", "Pay");
        catalog.insert("Order:pay", "Pay now");
        assert_eq!(catalog.translate("Order:pay"), "Pay now");
        assert!(!catalog.is_empty());
    }
}
