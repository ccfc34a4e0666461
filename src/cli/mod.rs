//! CLI module
//!
//! Command-line interface over the Huntress client.
//!
//! # Commands
//!
//! - `account` / `actor` - Show who the credentials belong to
//! - `list` - Fetch every page of a resource
//! - `get` - Fetch one record
//! - `remediations` / `remediation` - Incident report remediations
//! - `resources` - Show the resource table

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
