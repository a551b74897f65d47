//! Display formatting for terminal output
//!
//! Renders computed schedules and distributions as tables, JSON, or CSV.

pub mod allocation;
pub mod recurrence;

use std::fmt;

pub use allocation::{allocation_csv, format_allocation_table};
pub use recurrence::{format_occurrence_table, format_schedule_summary};

/// Output format for result-producing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
