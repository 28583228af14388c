//! Settings module - persisted profile, scopes and connection records

mod connections;
mod store;

pub use connections::{Connection, ConnectionRegistry};
pub use store::{
    JsonStore, Profile, SaveOutcome, SettingScope, SettingsError, SettingsStore, WORKSPACE_FILE,
};
