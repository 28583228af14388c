//! Shared test fakes for the conversion flow
//!
//! Scripted stand-ins for every orchestrator collaborator, so state-machine
//! transitions can be exercised without a terminal, a settings file or a
//! generator process.

// Not every integration test uses every fake.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::Result;
use serde_json::{json, Map, Value};

use sql2class::convert::{
    GenerationRequest, GenerationResult, GeneratorInvoker, InputProvider, Notifier,
    ResultPresenter, SelectItem,
};
use sql2class::settings::{SettingScope, SettingsError, SettingsStore};

/// Prompt surface answering from pre-scripted queues. Records every title,
/// preset and option list it was shown.
#[derive(Default)]
pub struct ScriptedInput {
    pub active_selection: Option<String>,
    pub texts: VecDeque<Option<String>>,
    pub secrets: VecDeque<Option<String>>,
    pub selections: VecDeque<Option<String>>,
    pub text_titles: Vec<String>,
    pub text_presets: Vec<Option<String>>,
    pub secret_titles: Vec<String>,
    pub select_titles: Vec<String>,
    pub select_options: Vec<Vec<String>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputProvider for ScriptedInput {
    fn prompt_text(
        &mut self,
        title: &str,
        _placeholder: Option<&str>,
        preset: Option<&str>,
    ) -> Result<Option<String>> {
        self.text_titles.push(title.to_string());
        self.text_presets.push(preset.map(str::to_string));
        Ok(self.texts.pop_front().unwrap_or_else(|| {
            panic!("unscripted text prompt: {title}");
        }))
    }

    fn prompt_secret(&mut self, title: &str) -> Result<Option<String>> {
        self.secret_titles.push(title.to_string());
        Ok(self.secrets.pop_front().unwrap_or_else(|| {
            panic!("unscripted secret prompt: {title}");
        }))
    }

    fn prompt_select_one(
        &mut self,
        title: &str,
        options: &[SelectItem],
    ) -> Result<Option<String>> {
        self.select_titles.push(title.to_string());
        self.select_options
            .push(options.iter().map(|item| item.label.clone()).collect());
        Ok(self.selections.pop_front().unwrap_or_else(|| {
            panic!("unscripted select prompt: {title}");
        }))
    }

    fn read_active_selection(&mut self) -> Result<Option<String>> {
        Ok(self.active_selection.take())
    }
}

/// In-memory settings store with a switchable workspace scope.
pub struct MemoryStore {
    pub values: Map<String, Value>,
    pub workspace_writable: bool,
    pub writes: Vec<(String, Value, SettingScope)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            values: Map::new(),
            workspace_writable: false,
            writes: Vec::new(),
        }
    }

    /// Seed a value without recording it as a write.
    pub fn seed(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value, scope: SettingScope) -> Result<(), SettingsError> {
        if !self.can_write(scope) {
            return Err(SettingsError::NoWritableScope(scope));
        }
        self.values.insert(key.to_string(), value.clone());
        self.writes.push((key.to_string(), value, scope));
        Ok(())
    }

    fn can_write(&self, scope: SettingScope) -> bool {
        match scope {
            SettingScope::Global => true,
            SettingScope::Workspace => self.workspace_writable,
        }
    }
}

/// Invoker returning a canned result while recording every argv it was
/// handed.
pub struct RecordingInvoker {
    pub result: GenerationResult,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingInvoker {
    pub fn succeeding(output: &str) -> Self {
        Self::with_result(GenerationResult {
            output_text: Some(output.to_string()),
            diagnostic_text: Some(String::new()),
        })
    }

    pub fn with_result(result: GenerationResult) -> Self {
        RecordingInvoker {
            result,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl GeneratorInvoker for RecordingInvoker {
    fn invoke(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.calls.borrow_mut().push(request.to_argv());
        Ok(self.result.clone())
    }
}

/// Presenter that keeps the documents it was asked to open.
#[derive(Default)]
pub struct RecordingPresenter {
    pub documents: Vec<(String, String)>,
}

impl ResultPresenter for RecordingPresenter {
    fn present(&mut self, suggested_file_name: &str, text: &str) -> Result<()> {
        self.documents
            .push((suggested_file_name.to_string(), text.to_string()));
        Ok(())
    }
}

/// Notifier that keeps every message by severity.
#[derive(Default)]
pub struct RecordingNotifier {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }
}

/// JSON for one saved connection in the settings schema.
pub fn connection_json(
    name: &str,
    jdbc_url: &str,
    user_id: &str,
    password: &str,
    use_saved_password: bool,
) -> Value {
    json!({
        "name": name,
        "description": format!("{name} connection"),
        "jdbcUrl": jdbc_url,
        "userId": user_id,
        "password": password,
        "useSavedPassword": use_saved_password,
    })
}
