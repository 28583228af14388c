//! Terminal styling utilities for notices and the application banner

use console::style;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("sql2class").cyan().bold(),
        style("SQL query ➜ Java data class").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print a blocking error message; the run terminates after this.
pub fn print_error(message: &str) {
    eprintln!(
        "    {} {}",
        style("✗").red().bold(),
        style(message).red().bold()
    );
}

/// Print a non-blocking warning message
pub fn print_warning(message: &str) {
    eprintln!("    {} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print a dim hint line above a prompt
pub fn print_hint(message: &str) {
    println!("    {}", style(message).dim());
}
