//! sql2class binary entry point

mod cli;
mod convert;
mod settings;
mod utils;

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, ConsoleNotifier, DialoguerInput};
use convert::{CancelSignal, ConsolePresenter, JarInvoker, Orchestrator, RunOutcome};
use settings::JsonStore;
use utils::{print_banner, print_error};

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(RunOutcome::Completed) => 0,
        Ok(RunOutcome::Aborted(_)) => 1,
        Err(err) => {
            // Single top-level catch: any unexpected collaborator failure
            // ends up here as one blocking message.
            print_error(&format!("{:#}", err));
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<RunOutcome> {
    let (sql, jar) = cli.convert_options();

    print_banner(env!("CARGO_PKG_VERSION"));

    let mut store = JsonStore::load(Path::new("."))?;
    let jar = JarInvoker::resolve_jar(&store, jar)?;
    let invoker = JarInvoker::new(jar, CancelSignal::new());

    let mut input = DialoguerInput::new(sql);
    let mut presenter = ConsolePresenter::new();
    let mut notifier = ConsoleNotifier::new();

    Orchestrator::new(&mut input, &invoker, &mut presenter, &mut notifier, &mut store).run()
}
