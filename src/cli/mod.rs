//! CLI module - argument parsing and interactive prompt implementations

mod args;
mod prompts;

pub use args::{Cli, Commands};
pub use prompts::{ConsoleNotifier, DialoguerInput};
