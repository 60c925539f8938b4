use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use crimedesk::model::{CaseStatus, CrimeType, Priority};
use crimedesk::query::{CaseQuery, DateRange};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crimedesk", version)]
#[command(about = "Session-scoped crime case desk", long_about = None)]
pub struct Cli {
    /// Data directory for config, evidence uploads and exports
    /// (defaults to $CRIMEDESK_HOME, then the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Read session commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// One line of session input. Parsed without a binary name.
#[derive(Parser, Debug)]
#[command(name = "crimedesk", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new case
    #[command(alias = "n")]
    Register(RegisterArgs),

    /// List cases, optionally filtered
    #[command(alias = "ls")]
    List(FilterArgs),

    /// Search every field for a term
    Search {
        /// Text to look for (case-insensitive)
        term: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the full details of a case
    #[command(alias = "v")]
    Show {
        /// Case id (e.g. CASE-20240309-AB12CD)
        id: String,
    },

    /// Headline figures and grouped counts
    Stats(FilterArgs),

    /// Manage the officer registry
    Officer {
        #[command(subcommand)]
        action: OfficerAction,
    },

    /// Export the filtered cases as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Write to this file instead of the export directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a JSON snapshot of all cases and officers
    Backup {
        /// Write to this file instead of the export directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List or extract the evidence files of a case
    Files {
        /// Case id
        id: String,

        /// Copy the files into this directory
        #[arg(long)]
        extract: Option<PathBuf>,
    },

    /// Delete all cases from this session
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., export-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Case and officer counts, last registration, data locations
    Info,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Crime type (e.g. Theft, "Drug Offense")
    #[arg(short = 't', long = "type")]
    pub crime_type: Option<CrimeType>,

    /// Where the incident happened
    #[arg(short, long, default_value = "")]
    pub location: String,

    /// Assigned officer
    #[arg(short, long, default_value = "")]
    pub officer: String,

    /// What happened (at least 10 characters)
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Case status (defaults to Open)
    #[arg(long)]
    pub status: Option<CaseStatus>,

    /// Priority level (defaults to Medium)
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Incident date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Additional notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Evidence file to attach (repeatable)
    #[arg(short, long = "attach")]
    pub attachments: Vec<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Text to look for in any field
    #[arg(short, long)]
    pub search: Option<String>,

    /// Crime type (repeatable)
    #[arg(long = "type")]
    pub crime_types: Vec<CrimeType>,

    /// Status (repeatable)
    #[arg(long = "status")]
    pub statuses: Vec<CaseStatus>,

    /// Priority (repeatable)
    #[arg(long = "priority")]
    pub priorities: Vec<Priority>,

    /// Officer (repeatable)
    #[arg(long = "officer")]
    pub officers: Vec<String>,

    /// Incident date range start, inclusive
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Incident date range end, inclusive
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_query(&self) -> CaseQuery {
        CaseQuery {
            text: self.search.clone(),
            crime_types: self.crime_types.clone(),
            statuses: self.statuses.clone(),
            priorities: self.priorities.clone(),
            officers: self.officers.clone(),
            date_range: match (self.from, self.to) {
                (Some(start), Some(end)) => Some(DateRange::new(start, end)),
                _ => None,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum OfficerAction {
    /// Add an officer to the registry
    Add {
        /// Officer name; words are joined, so quoting is optional
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List registered officers
    #[command(alias = "ls")]
    List,
}
