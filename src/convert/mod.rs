//! Conversion flow - session state, orchestrator, generator and presenter

mod generator;
mod orchestrator;
mod presenter;
mod session;

pub use generator::{
    CancelSignal, GenerationRequest, GenerationResult, GeneratorInvoker, JarInvoker, Outcome,
    CANCELLED_DIAGNOSTIC,
};
pub use orchestrator::{InputProvider, Notifier, Orchestrator, RunOutcome, SelectItem};
pub use presenter::{ConsolePresenter, ResultPresenter};
pub use session::{
    is_embedded_url, ConversionSession, TemplateType, AUTH_PLACEHOLDER, EMBEDDED_URL_PREFIX,
};
