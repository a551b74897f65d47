//! Tally - repeating transaction schedules and budget limit distribution
//!
//! This library holds the arithmetic behind two forms of a personal-finance
//! app: the transaction form, where an entry can repeat a number of times at
//! a daily, weekly, monthly or yearly cadence, and the budget form, where a
//! total limit is spread evenly across the selected categories and their
//! subcategories.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic log setup
//! - `models`: Money, locales, repetition specs, budget selections
//! - `services`: Calendar arithmetic, recurrence and distribution
//! - `display`: Table, JSON and CSV rendering
//! - `cli`: Command handlers for the `tally` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tally::models::{Frequency, RecurrenceSpec};
//! use tally::services::compute_end_date;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let spec = RecurrenceSpec::every(start, Frequency::Daily, 5);
//! assert_eq!(
//!     compute_end_date(&spec).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
//! );
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{TallyError, TallyResult};
