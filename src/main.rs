use anyhow::Result;
use clap::{Parser, Subcommand};

use tally::cli::{
    handle_config_command, handle_currency_command, handle_distribute_command,
    handle_repeat_command, ConfigCommands, CurrencyCommands, DistributeArgs, RepeatArgs,
};
use tally::config::{Settings, TallyPaths};
use tally::models::LocaleTag;

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Repeating transaction schedules and even budget-limit distribution",
    long_about = "Tally computes the end date of repeating income and expense entries \
                  and spreads a budget's total limit evenly across the selected \
                  categories and subcategories."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the display locale (pt-BR, en-US)
    #[arg(long, global = true)]
    locale: Option<LocaleTag>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the schedule of a repeating transaction
    #[command(alias = "rep")]
    Repeat(RepeatArgs),

    /// Split a budget's total limit evenly across selected categories
    #[command(alias = "dist")]
    Distribute(DistributeArgs),

    /// Parse and format currency display strings
    #[command(subcommand)]
    Currency(CurrencyCommands),

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tally::logging::init(cli.verbose);

    let paths = TallyPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }

    match cli.command {
        Some(Commands::Repeat(args)) => handle_repeat_command(&settings, args)?,
        Some(Commands::Distribute(args)) => handle_distribute_command(&settings, args)?,
        Some(Commands::Currency(cmd)) => handle_currency_command(&settings, cmd)?,
        Some(Commands::Config { action }) => {
            handle_config_command(&paths, &settings, action.unwrap_or(ConfigCommands::Show))?
        }
        None => {
            println!("Tally - repeating transactions and budget distribution");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}
