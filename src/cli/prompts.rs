//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Input, Password, Select};

use crate::convert::{InputProvider, Notifier, SelectItem};
use crate::utils::{print_error, print_hint, print_info, print_warning};

/// Terminal prompt surface. A Ctrl-C interrupt during a text or secret
/// prompt counts as dismissal; Esc dismisses select menus.
pub struct DialoguerInput {
    /// CLI analog of the editor's active selection, taken from `--sql`.
    active_selection: Option<String>,
}

impl DialoguerInput {
    pub fn new(active_selection: Option<String>) -> Self {
        DialoguerInput { active_selection }
    }
}

impl InputProvider for DialoguerInput {
    fn prompt_text(
        &mut self,
        title: &str,
        placeholder: Option<&str>,
        preset: Option<&str>,
    ) -> Result<Option<String>> {
        if let Some(hint) = placeholder {
            print_hint(hint);
        }
        let mut input = Input::<String>::new().with_prompt(title).allow_empty(true);
        if let Some(preset) = preset.filter(|p| !p.is_empty()) {
            input = input.with_initial_text(preset);
        }
        match input.interact_text() {
            Ok(answer) => Ok(Some(answer)),
            Err(err) if is_interrupted(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn prompt_secret(&mut self, title: &str) -> Result<Option<String>> {
        match Password::new()
            .with_prompt(title)
            .allow_empty_password(true)
            .interact()
        {
            Ok(answer) => Ok(Some(answer)),
            Err(err) if is_interrupted(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn prompt_select_one(
        &mut self,
        title: &str,
        options: &[SelectItem],
    ) -> Result<Option<String>> {
        let labels: Vec<String> = options
            .iter()
            .map(|item| {
                if item.description.is_empty() {
                    item.label.clone()
                } else {
                    format!("{}  ({})", item.label, item.description)
                }
            })
            .collect();
        let chosen = Select::new()
            .with_prompt(title)
            .items(&labels)
            .default(0)
            .interact_opt()?;
        Ok(chosen.map(|index| options[index].label.clone()))
    }

    fn read_active_selection(&mut self) -> Result<Option<String>> {
        Ok(self.active_selection.take().filter(|s| !s.is_empty()))
    }
}

fn is_interrupted(err: &dialoguer::Error) -> bool {
    match err {
        dialoguer::Error::IO(io_err) => io_err.kind() == std::io::ErrorKind::Interrupted,
    }
}

/// Styled terminal notices.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        ConsoleNotifier
    }
}

impl Notifier for ConsoleNotifier {
    fn error(&mut self, message: &str) {
        print_error(message);
    }

    fn warn(&mut self, message: &str) {
        print_warning(message);
    }

    fn info(&mut self, message: &str) {
        print_info(message);
    }
}
