//! Config CLI commands

use clap::Subcommand;

use crate::config::{Settings, TallyPaths};
use crate::error::TallyResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the config location and effective settings
    Show,

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &TallyPaths,
    settings: &Settings,
    cmd: ConfigCommands,
) -> TallyResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Tally Configuration");
            println!("===================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Locale:          {}", settings.locale);
            println!("  Date format:     {}", settings.date_format);
            println!("  Max occurrences: {}", settings.max_occurrences);
            println!("  Month overflow:  {:?}", settings.month_overflow);
            println!("  Allocation mode: {:?}", settings.allocation_mode);
        }
        ConfigCommands::Init { force } => {
            if paths.is_initialized() && !force {
                println!(
                    "Settings already exist at {} (use --force to overwrite)",
                    paths.settings_file().display()
                );
                return Ok(());
            }

            Settings::default().save(paths)?;
            println!("Wrote default settings to {}", paths.settings_file().display());
        }
    }

    Ok(())
}
