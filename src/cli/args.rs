//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sql2class - Convert a SQL query into a Java data class interactively
#[derive(Parser, Debug)]
#[command(name = "sql2class")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQL text to convert. Plays the role of an editor selection: when
    /// given, the SQL prompt is skipped.
    #[arg(long)]
    pub sql: Option<String>,

    /// Path to the generator jar. Overrides the `generatorJar` setting and
    /// the default location next to the executable.
    #[arg(long)]
    pub jar: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive conversion (the default when no subcommand is given)
    Convert {
        /// SQL text to convert, skipping the SQL prompt
        #[arg(long)]
        sql: Option<String>,

        /// Path to the generator jar
        #[arg(long)]
        jar: Option<PathBuf>,
    },
}

impl Cli {
    /// Effective options of the single `convert` entry point, whether the
    /// subcommand was spelled out or not.
    pub fn convert_options(self) -> (Option<String>, Option<PathBuf>) {
        match self.command {
            Some(Commands::Convert { sql, jar }) => (sql, jar),
            None => (self.sql, self.jar),
        }
    }
}
