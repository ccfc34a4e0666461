//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the Huntress API
#[derive(Parser, Debug)]
#[command(name = "huntress")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API endpoint
    #[arg(long, global = true, env = "HUNTRESS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Records per page
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the account the credentials belong to
    Account,

    /// Show the actor performing requests
    Actor,

    /// List every record of a resource
    List {
        /// Resource name (agents, billing_reports, incident_reports, organizations, reports, signals)
        resource: String,

        /// Extra query parameters as key=value
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Fetch one record of a resource
    Get {
        /// Resource name (plural or singular)
        resource: String,

        /// Record id
        id: String,
    },

    /// List remediations of an incident report
    Remediations {
        /// Incident report id
        incident_report_id: String,
    },

    /// Fetch one remediation of an incident report
    Remediation {
        /// Incident report id
        incident_report_id: String,

        /// Remediation id
        id: String,
    },

    /// List the resources this client knows
    Resources,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON
    Pretty,
    /// Compact JSON, one record per line for collections
    Json,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value: no '=' in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid key=value: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
