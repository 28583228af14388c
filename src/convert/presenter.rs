//! Presentation of generated source text

use anyhow::Result;
use console::style;

/// Sink for generated source. The terminal implementation prints a fresh
/// block per run; nothing is written to disk.
pub trait ResultPresenter {
    fn present(&mut self, suggested_file_name: &str, text: &str) -> Result<()>;
}

/// Prints the generated class between styled rules, headed by the suggested
/// file name.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        ConsolePresenter
    }
}

impl ResultPresenter for ConsolePresenter {
    fn present(&mut self, suggested_file_name: &str, text: &str) -> Result<()> {
        println!();
        println!(
            "    {} {}",
            style("◆").cyan().bold(),
            style(suggested_file_name).white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!("{}", text);
        println!("    {}", style("─".repeat(50)).dim());
        Ok(())
    }
}
