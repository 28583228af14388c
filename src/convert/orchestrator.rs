//! Conversion orchestrator
//!
//! Drives the interactive collection sequence as an explicit state machine:
//! AcquireSql → AcquireConnection → SelectTemplate → AcquirePackageName →
//! AcquireClassName → Invoke → Present → PersistPreferences. Every prompt is
//! a potential exit point; a dismissed required prompt terminates the run
//! with a field-named blocking message and no further side effects.

use anyhow::{anyhow, Result};

use crate::settings::{ConnectionRegistry, Profile, SaveOutcome, SettingsStore};

use super::{
    is_embedded_url, ConversionSession, GenerationRequest, GeneratorInvoker, Outcome,
    ResultPresenter, TemplateType, AUTH_PLACEHOLDER,
};

const SQL_PROMPT_HINT: &str =
    "SQL query syntax (parameters can also be included) will be converted into a Java data class";
const JDBC_URL_HINT: &str =
    "Only accept connection strings starting with jdbc:mysql/jdbc:sqlserver/jdbc:oracle/jdbc:sqlite";

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub label: String,
    pub description: String,
}

/// Interactive prompt surface. Every operation suspends until the user
/// answers or dismisses; dismissal is `None`, never an error. Empty text is
/// reported as given; the orchestrator decides where empty counts as missing.
pub trait InputProvider {
    fn prompt_text(
        &mut self,
        title: &str,
        placeholder: Option<&str>,
        preset: Option<&str>,
    ) -> Result<Option<String>>;
    fn prompt_secret(&mut self, title: &str) -> Result<Option<String>>;
    fn prompt_select_one(&mut self, title: &str, options: &[SelectItem])
        -> Result<Option<String>>;
    fn read_active_selection(&mut self) -> Result<Option<String>>;
}

/// User-visible notices. `error` is blocking in spirit: it always precedes
/// run termination.
pub trait Notifier {
    fn error(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn info(&mut self, message: &str);
}

/// How one conversion run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Aborted(String),
}

/// Named states of the collection sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    AcquireSql,
    AcquireConnection,
    SelectTemplate,
    AcquirePackageName,
    AcquireClassName,
    Invoke,
    Present,
    PersistPreferences,
}

enum Flow {
    Next(Step),
    Abort(String),
    Done,
}

struct RunState {
    session: ConversionSession,
    generated: Option<String>,
}

/// Stateless orchestrator over injected collaborators; all run state lives
/// in the per-run [`ConversionSession`].
pub struct Orchestrator<'a> {
    input: &'a mut dyn InputProvider,
    invoker: &'a dyn GeneratorInvoker,
    presenter: &'a mut dyn ResultPresenter,
    notifier: &'a mut dyn Notifier,
    store: &'a mut dyn SettingsStore,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        input: &'a mut dyn InputProvider,
        invoker: &'a dyn GeneratorInvoker,
        presenter: &'a mut dyn ResultPresenter,
        notifier: &'a mut dyn Notifier,
        store: &'a mut dyn SettingsStore,
    ) -> Self {
        Orchestrator {
            input,
            invoker,
            presenter,
            notifier,
            store,
        }
    }

    /// Runs one conversion from first prompt to preference persistence.
    /// Collaborator failures propagate to the caller, which reports them as
    /// a single blocking message.
    pub fn run(&mut self) -> Result<RunOutcome> {
        let mut state = RunState {
            session: ConversionSession::default(),
            generated: None,
        };
        let mut step = Step::AcquireSql;
        loop {
            let flow = match step {
                Step::AcquireSql => self.acquire_sql(&mut state)?,
                Step::AcquireConnection => self.acquire_connection(&mut state)?,
                Step::SelectTemplate => self.select_template(&mut state)?,
                Step::AcquirePackageName => self.acquire_package_name(&mut state)?,
                Step::AcquireClassName => self.acquire_class_name(&mut state)?,
                Step::Invoke => self.invoke(&mut state)?,
                Step::Present => self.present(&mut state)?,
                Step::PersistPreferences => self.persist_preferences(&state)?,
            };
            match flow {
                Flow::Next(next) => step = next,
                Flow::Abort(message) => {
                    self.notifier.error(&message);
                    return Ok(RunOutcome::Aborted(message));
                }
                Flow::Done => return Ok(RunOutcome::Completed),
            }
        }
    }

    fn acquire_sql(&mut self, state: &mut RunState) -> Result<Flow> {
        let selection = self.input.read_active_selection()?.filter(|s| !s.is_empty());
        let sql = match selection {
            Some(sql) => Some(sql),
            None => non_empty(self.input.prompt_text(
                "Input SQL query syntax",
                Some(SQL_PROMPT_HINT),
                None,
            )?),
        };
        match sql {
            Some(sql) => {
                state.session.sql_text = Some(sql);
                Ok(Flow::Next(Step::AcquireConnection))
            }
            None => Ok(Flow::Abort("No SQL query syntax inputed".into())),
        }
    }

    fn acquire_connection(&mut self, state: &mut RunState) -> Result<Flow> {
        let connections = ConnectionRegistry::new(&*self.store).list_connections();
        let chosen = if connections.is_empty() {
            None
        } else {
            let items: Vec<SelectItem> = connections
                .iter()
                .map(|conn| SelectItem {
                    label: conn.name.clone(),
                    description: conn.description.clone(),
                })
                .collect();
            self.input
                .prompt_select_one("Select a connection (press 'Esc' to manual input)", &items)?
                .and_then(|label| connections.iter().find(|conn| conn.name == label).cloned())
        };

        match chosen {
            Some(conn) => {
                state.session.jdbc_url = Some(conn.jdbc_url.clone());
                state.session.user_id = Some(conn.user_id.clone());
                if conn.use_saved_password {
                    state.session.password = Some(conn.password);
                } else if is_embedded_url(&conn.jdbc_url) {
                    state.session.password = Some(AUTH_PLACEHOLDER.into());
                } else {
                    match self.input.prompt_secret("Input Password")? {
                        Some(password) => state.session.password = Some(password),
                        None => return Ok(Flow::Abort("No Password inputed".into())),
                    }
                }
            }
            None => {
                // Manual sub-flow: the registry was empty or the user escaped
                // the connection menu.
                let url = match non_empty(self.input.prompt_text(
                    "Input JDBC url",
                    Some(JDBC_URL_HINT),
                    None,
                )?) {
                    Some(url) => url,
                    None => return Ok(Flow::Abort("No JDBC url inputed".into())),
                };
                if is_embedded_url(&url) {
                    // The embedded dialect takes no credentials.
                    state.session.user_id = Some(AUTH_PLACEHOLDER.into());
                    state.session.password = Some(AUTH_PLACEHOLDER.into());
                } else {
                    match non_empty(self.input.prompt_text("Input User id", None, None)?) {
                        Some(user_id) => state.session.user_id = Some(user_id),
                        None => return Ok(Flow::Abort("No User id inputed".into())),
                    }
                    // Dismissal aborts; an explicitly blank password is valid.
                    match self.input.prompt_secret("Input Password")? {
                        Some(password) => state.session.password = Some(password),
                        None => return Ok(Flow::Abort("No Password inputed".into())),
                    }
                }
                state.session.jdbc_url = Some(url);
            }
        }
        Ok(Flow::Next(Step::SelectTemplate))
    }

    fn select_template(&mut self, state: &mut RunState) -> Result<Flow> {
        let default = Profile::new(&mut *self.store).default_template_type();
        let menu = TemplateType::menu(default.as_deref());
        let items: Vec<SelectItem> = menu
            .iter()
            .map(|template| SelectItem {
                label: template.label().to_string(),
                description: template.description().to_string(),
            })
            .collect();
        let chosen = self
            .input
            .prompt_select_one("Select a template to create Java data class", &items)?
            .and_then(|label| TemplateType::from_label(&label));
        match chosen {
            Some(template) => {
                state.session.template_type = Some(template);
                Ok(Flow::Next(Step::AcquirePackageName))
            }
            None => Ok(Flow::Abort("No Template selected".into())),
        }
    }

    fn acquire_package_name(&mut self, state: &mut RunState) -> Result<Flow> {
        let preset = Profile::new(&mut *self.store)
            .default_package_name()
            .unwrap_or_default();
        match non_empty(self.input.prompt_text("Input Package name", None, Some(&preset))?) {
            Some(package_name) => {
                state.session.package_name = Some(package_name);
                Ok(Flow::Next(Step::AcquireClassName))
            }
            None => Ok(Flow::Abort("No Package name inputed".into())),
        }
    }

    fn acquire_class_name(&mut self, state: &mut RunState) -> Result<Flow> {
        let preset = Profile::new(&mut *self.store)
            .default_class_name()
            .unwrap_or_default();
        match non_empty(self.input.prompt_text("Input Class name", None, Some(&preset))?) {
            Some(class_name) => {
                state.session.class_name = Some(class_name);
                Ok(Flow::Next(Step::Invoke))
            }
            None => Ok(Flow::Abort("No Class name inputed".into())),
        }
    }

    fn invoke(&mut self, state: &mut RunState) -> Result<Flow> {
        let request: GenerationRequest = state
            .session
            .request()
            .ok_or_else(|| anyhow!("conversion session is incomplete"))?;
        let result = self.invoker.invoke(&request)?;
        match result.classify() {
            Outcome::Failure { diagnostic } => Ok(Flow::Abort(diagnostic)),
            Outcome::Warning { output, diagnostic } => {
                self.notifier.warn(&diagnostic);
                state.generated = Some(output);
                Ok(Flow::Next(Step::Present))
            }
            Outcome::Success { output } => {
                state.generated = Some(output);
                Ok(Flow::Next(Step::Present))
            }
        }
    }

    fn present(&mut self, state: &mut RunState) -> Result<Flow> {
        let class_name = state
            .session
            .class_name
            .as_deref()
            .ok_or_else(|| anyhow!("class name missing at presentation"))?;
        let text = state
            .generated
            .take()
            .ok_or_else(|| anyhow!("generated source missing at presentation"))?;
        self.presenter
            .present(&format!("{}.java", class_name), &text)?;
        self.notifier.info("Conversion finished");
        Ok(Flow::Next(Step::PersistPreferences))
    }

    fn persist_preferences(&mut self, state: &RunState) -> Result<Flow> {
        let session = &state.session;
        let mut profile = Profile::new(&mut *self.store);

        let mut pending: Vec<(&str, SaveOutcome)> = Vec::new();
        if profile.use_last_template_type() {
            if let Some(template) = session.template_type {
                pending.push((
                    "Template type",
                    profile.save_last_template_type(template.as_arg())?,
                ));
            }
        }
        if profile.use_last_package_name() {
            if let Some(package_name) = &session.package_name {
                pending.push(("Package name", profile.save_last_package_name(package_name)?));
            }
        }
        if profile.use_last_class_name() {
            if let Some(class_name) = &session.class_name {
                pending.push(("Class name", profile.save_last_class_name(class_name)?));
            }
        }

        for (field, outcome) in pending {
            if outcome == SaveOutcome::NoWritableScope {
                self.notifier.warn(&format!(
                    "Attempted to save {} to current Workspace settings, but failed due to no Workspace being opened",
                    field
                ));
            }
        }
        Ok(Flow::Done)
    }
}

fn non_empty(answer: Option<String>) -> Option<String> {
    answer.filter(|s| !s.is_empty())
}
