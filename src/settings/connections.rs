//! Saved connection profiles

use serde::{Deserialize, Serialize};

use super::SettingsStore;

/// A named, persisted set of database connection parameters. Owned by the
/// settings store; the conversion flow only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connection {
    pub name: String,
    pub description: String,
    pub jdbc_url: String,
    pub user_id: String,
    pub password: String,
    pub use_saved_password: bool,
}

impl Connection {
    /// Selectable entries carry at least a name, a url and a user id.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.jdbc_url.is_empty() && !self.user_id.is_empty()
    }
}

/// Read-only view over the configured `connections` list. Incomplete entries
/// are filtered out; configuration order is preserved.
pub struct ConnectionRegistry<'a> {
    store: &'a dyn SettingsStore,
}

impl<'a> ConnectionRegistry<'a> {
    pub fn new(store: &'a dyn SettingsStore) -> Self {
        ConnectionRegistry { store }
    }

    pub fn list_connections(&self) -> Vec<Connection> {
        let configured: Vec<Connection> = self
            .store
            .get("connections")
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();
        configured
            .into_iter()
            .filter(Connection::is_complete)
            .collect()
    }
}
