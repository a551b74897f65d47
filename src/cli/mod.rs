//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod currency;
pub mod distribute;
pub mod repeat;

pub use config::{handle_config_command, ConfigCommands};
pub use currency::{handle_currency_command, CurrencyCommands};
pub use distribute::{handle_distribute_command, DistributeArgs};
pub use repeat::{handle_repeat_command, RepeatArgs};
