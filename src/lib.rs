//! sql2class: SQL query to Java data class converter
//!
//! Interactive workflow that collects connection details, a SQL statement,
//! a code-style template and target naming, hands them to an external
//! generator process, and presents the generated source.

pub mod cli;
pub mod convert;
pub mod settings;
pub mod utils;
