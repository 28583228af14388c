//! Key/value settings profile with Global and Workspace scopes
//!
//! The global scope lives under the platform config directory; the workspace
//! scope is a `.sql2class.json` file in the current directory. Reads overlay
//! workspace values over global ones; writes target the scope selected by
//! the `settingTarget` key. A workspace scope only exists when its file does,
//! so workspace writes without one are rejected rather than creating files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::{Map, Value};
use thiserror::Error;

use super::{Connection, ConnectionRegistry};

pub const WORKSPACE_FILE: &str = ".sql2class.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no writable {0:?} settings scope")]
    NoWritableScope(SettingScope),
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingScope {
    Global,
    Workspace,
}

/// Capability handed to the orchestrator instead of ambient global state.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value, scope: SettingScope) -> Result<(), SettingsError>;
    fn can_write(&self, scope: SettingScope) -> bool;
}

/// Result of one independent preference write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    NoWritableScope,
}

/// File-backed store: one JSON object per scope.
pub struct JsonStore {
    global_path: PathBuf,
    workspace_path: Option<PathBuf>,
    global: Map<String, Value>,
    workspace: Map<String, Value>,
}

impl JsonStore {
    /// Loads the global profile from the platform config directory and the
    /// workspace profile from `.sql2class.json` in `workspace_dir`, when
    /// that file exists.
    pub fn load(workspace_dir: &Path) -> Result<Self, SettingsError> {
        let global_path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sql2class/settings.json");
        let workspace_file = workspace_dir.join(WORKSPACE_FILE);
        let workspace_path = workspace_file.is_file().then_some(workspace_file);
        Self::from_paths(global_path, workspace_path)
    }

    pub fn from_paths(
        global_path: PathBuf,
        workspace_path: Option<PathBuf>,
    ) -> Result<Self, SettingsError> {
        let global = read_scope(&global_path)?;
        let workspace = match &workspace_path {
            Some(path) => read_scope(path)?,
            None => Map::new(),
        };
        Ok(JsonStore {
            global_path,
            workspace_path,
            global,
            workspace,
        })
    }

    fn flush(&self, scope: SettingScope) -> Result<(), SettingsError> {
        let (path, values) = match scope {
            SettingScope::Global => (&self.global_path, &self.global),
            SettingScope::Workspace => (
                self.workspace_path
                    .as_ref()
                    .ok_or(SettingsError::NoWritableScope(scope))?,
                &self.workspace,
            ),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(values.clone()))
            .expect("settings map serializes");
        fs::write(path, text).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })
    }
}

fn read_scope(path: &Path) -> Result<Map<String, Value>, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let value: Value = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

impl SettingsStore for JsonStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.workspace
            .get(key)
            .or_else(|| self.global.get(key))
            .cloned()
    }

    fn set(&mut self, key: &str, value: Value, scope: SettingScope) -> Result<(), SettingsError> {
        if !self.can_write(scope) {
            return Err(SettingsError::NoWritableScope(scope));
        }
        match scope {
            SettingScope::Global => self.global.insert(key.to_string(), value),
            SettingScope::Workspace => self.workspace.insert(key.to_string(), value),
        };
        self.flush(scope)
    }

    fn can_write(&self, scope: SettingScope) -> bool {
        match scope {
            SettingScope::Global => true,
            SettingScope::Workspace => self.workspace_path.is_some(),
        }
    }
}

/// Typed view over the raw key/value store.
pub struct Profile<'a> {
    store: &'a mut dyn SettingsStore,
}

impl<'a> Profile<'a> {
    pub fn new(store: &'a mut dyn SettingsStore) -> Self {
        Profile { store }
    }

    pub fn connections(&self) -> Vec<Connection> {
        ConnectionRegistry::new(&*self.store).list_connections()
    }

    pub fn default_template_type(&self) -> Option<String> {
        self.get_string("defaultTemplateType")
    }

    pub fn default_package_name(&self) -> Option<String> {
        self.get_string("defaultPackageName")
    }

    pub fn default_class_name(&self) -> Option<String> {
        self.get_string("defaultClassName")
    }

    pub fn use_last_template_type(&self) -> bool {
        self.get_bool("useLastTemplateType")
    }

    pub fn use_last_package_name(&self) -> bool {
        self.get_bool("useLastPackageName")
    }

    pub fn use_last_class_name(&self) -> bool {
        self.get_bool("useLastClassName")
    }

    /// Write scope selected by the `settingTarget` key; anything other than
    /// "Workspace" means Global.
    pub fn setting_target(&self) -> SettingScope {
        match self.get_string("settingTarget").as_deref() {
            Some("Workspace") => SettingScope::Workspace,
            _ => SettingScope::Global,
        }
    }

    /// Persists the template type, capitalizing the first letter so the
    /// stored form matches the menu labels.
    pub fn save_last_template_type(&mut self, template_type: &str) -> Result<SaveOutcome, SettingsError> {
        let mut chars = template_type.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        self.save("defaultTemplateType", Value::String(capitalized))
    }

    pub fn save_last_package_name(&mut self, package_name: &str) -> Result<SaveOutcome, SettingsError> {
        self.save("defaultPackageName", Value::String(package_name.to_string()))
    }

    pub fn save_last_class_name(&mut self, class_name: &str) -> Result<SaveOutcome, SettingsError> {
        self.save("defaultClassName", Value::String(class_name.to_string()))
    }

    fn save(&mut self, key: &str, value: Value) -> Result<SaveOutcome, SettingsError> {
        let scope = self.setting_target();
        if !self.store.can_write(scope) {
            return Ok(SaveOutcome::NoWritableScope);
        }
        self.store.set(key, value, scope)?;
        Ok(SaveOutcome::Saved)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .and_then(|v| v.as_str().map(str::to_string))
    }

    fn get_bool(&self, key: &str) -> bool {
        self.store
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}
