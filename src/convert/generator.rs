//! External generator process invocation
//!
//! Launches the SQL-to-class generator as a child process with a discrete
//! argument vector (never through a shell) and captures its two output
//! channels verbatim. The wait loop shows an indeterminate spinner and polls
//! for a cancel key; cancellation kills the child and resolves as a failure.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::settings::SettingsStore;
use crate::utils::create_spinner;

use super::TemplateType;

/// Diagnostic text reported when the user cancels a running invocation.
pub const CANCELLED_DIAGNOSTIC: &str = "Conversion cancelled";

/// Fully collected parameters for one generator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub template_type: TemplateType,
    pub package_name: String,
    pub class_name: String,
    pub jdbc_url: String,
    pub user_id: String,
    pub password: String,
    pub sql_text: String,
}

impl GenerationRequest {
    /// Argument vector in the exact order the generator expects. Every value
    /// is passed as its own argument; SQL text with embedded quotes or shell
    /// metacharacters needs no escaping.
    pub fn to_argv(&self) -> Vec<String> {
        vec![
            self.template_type.as_arg().to_string(),
            self.package_name.clone(),
            self.class_name.clone(),
            self.jdbc_url.clone(),
            self.user_id.clone(),
            self.password.clone(),
            self.sql_text.clone(),
        ]
    }
}

/// Raw capture of the generator's output channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub output_text: Option<String>,
    pub diagnostic_text: Option<String>,
}

/// Classified generation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { output: String },
    Warning { output: String, diagnostic: String },
    Failure { diagnostic: String },
}

impl GenerationResult {
    pub fn cancelled() -> Self {
        GenerationResult {
            output_text: None,
            diagnostic_text: Some(CANCELLED_DIAGNOSTIC.to_string()),
        }
    }

    /// Channel-presence classification: stderr only is a hard failure, both
    /// channels a warning with usable output, stdout only a success. Neither
    /// channel present is undefined and treated as a failure.
    pub fn classify(self) -> Outcome {
        let output = self.output_text.filter(|s| !s.is_empty());
        let diagnostic = self.diagnostic_text.filter(|s| !s.is_empty());
        match (output, diagnostic) {
            (Some(output), None) => Outcome::Success { output },
            (Some(output), Some(diagnostic)) => Outcome::Warning { output, diagnostic },
            (None, Some(diagnostic)) => Outcome::Failure { diagnostic },
            (None, None) => Outcome::Failure {
                diagnostic: "Generator produced no output".to_string(),
            },
        }
    }
}

/// The external generator, opaque beyond its argument contract.
pub trait GeneratorInvoker {
    fn invoke(&self, request: &GenerationRequest) -> Result<GenerationResult>;
}

/// Cancellation flag shared with the invocation wait loop. The keyboard arms
/// it interactively; callers may also arm it up front.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    flag: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Invoker that runs the generator jar via `java`.
pub struct JarInvoker {
    program: PathBuf,
    leading_args: Vec<String>,
    cancel: CancelSignal,
}

impl JarInvoker {
    /// Standard invocation: `java -Dfile.encoding=UTF-8 -jar <jar> <argv…>`.
    pub fn new(jar: PathBuf, cancel: CancelSignal) -> Self {
        JarInvoker {
            program: PathBuf::from("java"),
            leading_args: vec![
                "-Dfile.encoding=UTF-8".to_string(),
                "-jar".to_string(),
                jar.display().to_string(),
            ],
            cancel,
        }
    }

    /// Arbitrary command front, used by tests to substitute the generator.
    pub fn with_command(program: PathBuf, leading_args: Vec<String>, cancel: CancelSignal) -> Self {
        JarInvoker {
            program,
            leading_args,
            cancel,
        }
    }

    /// Resolves the generator jar: explicit flag, then the `generatorJar`
    /// setting, then `resources/sql2class-generator.jar` next to the binary.
    pub fn resolve_jar(store: &dyn SettingsStore, flag: Option<PathBuf>) -> Result<PathBuf> {
        let jar = flag
            .or_else(|| {
                store
                    .get("generatorJar")
                    .and_then(|v| v.as_str().map(PathBuf::from))
            })
            .or_else(|| {
                let exe = std::env::current_exe().ok()?;
                Some(exe.parent()?.join("resources/sql2class-generator.jar"))
            })
            .ok_or_else(|| anyhow!("no generator jar configured; pass --jar or set generatorJar"))?;

        if !jar.is_file() {
            anyhow::bail!("Generator jar not found: {}", jar.display());
        }
        Ok(jar)
    }

    fn wait_with_cancel(&self, child: &mut Child) -> Result<bool> {
        let keys = RawModeGuard::enable();
        loop {
            if child.try_wait().context("failed to poll generator process")?.is_some() {
                return Ok(false);
            }
            if self.cancel.cancelled() || keys.cancel_key_pressed()? {
                child.kill().ok();
                child.wait().ok();
                return Ok(true);
            }
            if !keys.active {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

impl GeneratorInvoker for JarInvoker {
    fn invoke(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let spinner = create_spinner("Converting... (press Esc to cancel)");

        let mut child = Command::new(&self.program)
            .args(&self.leading_args)
            .args(request.to_argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch generator: {}", self.program.display()))?;

        // Drain both pipes off-thread so a chatty child cannot deadlock the
        // wait loop on a full pipe buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let cancelled = self.wait_with_cancel(&mut child);
        spinner.finish_and_clear();

        let output_text = join_channel(stdout)?;
        let diagnostic_text = join_channel(stderr)?;

        if cancelled? {
            return Ok(GenerationResult::cancelled());
        }

        Ok(GenerationResult {
            output_text: Some(output_text),
            diagnostic_text: Some(diagnostic_text),
        })
    }
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> Option<JoinHandle<std::io::Result<String>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        })
    })
}

fn join_channel(handle: Option<JoinHandle<std::io::Result<String>>>) -> Result<String> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| anyhow!("generator output reader panicked"))?
            .context("failed to read generator output"),
        None => Ok(String::new()),
    }
}

/// Puts the terminal in raw mode for the duration of the wait loop so Esc
/// and Ctrl-C key events can be observed. Degrades to flag-only cancellation
/// when no terminal is attached.
struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn enable() -> Self {
        RawModeGuard {
            active: terminal::enable_raw_mode().is_ok(),
        }
    }

    fn cancel_key_pressed(&self) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        while event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Esc || ctrl_c {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            terminal::disable_raw_mode().ok();
        }
    }
}
