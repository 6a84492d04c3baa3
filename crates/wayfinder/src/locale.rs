//! Label lookup for menu items.
//!
//! Menu labels are looked up by their dot-joined locale key
//! (e.g. `menu.account.settings`), falling back to the raw route name.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::MenuResult;
use crate::source::read_source;

/// Resolves a locale key to a display label.
pub trait Localizer: Send + Sync {
    /// Translate `key`, returning `default` when no message is known.
    fn translate(&self, key: &str, default: &str) -> String;
}

/// Localizer that always returns the default label.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Localizer for Passthrough {
    fn translate(&self, _key: &str, default: &str) -> String {
        default.to_string()
    }
}

/// In-memory message table keyed by locale key.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a flat `key: message` map from a JSON or YAML file.
    pub fn load(path: &Path) -> MenuResult<Self> {
        let messages: HashMap<String, String> = read_source(path)?;
        info!(path = %path.display(), count = messages.len(), "loaded menu messages");
        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MessageCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Localizer for MessageCatalog {
    fn translate(&self, key: &str, default: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}
