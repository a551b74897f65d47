//! Currency CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::money::{format_currency, parse_currency};
use crate::models::Money;

/// Currency subcommands
#[derive(Subcommand, Debug)]
pub enum CurrencyCommands {
    /// Read a display string (e.g. "R$ 1.234,56") as an amount
    Parse {
        /// Text as typed into a currency field
        text: String,
    },

    /// Render a decimal amount (e.g. 1234.56) for display
    Format {
        /// Decimal amount in currency units
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle a currency command
pub fn handle_currency_command(settings: &Settings, cmd: CurrencyCommands) -> TallyResult<()> {
    println!("{}", render_currency(settings, &cmd)?);
    Ok(())
}

pub fn render_currency(settings: &Settings, cmd: &CurrencyCommands) -> TallyResult<String> {
    match cmd {
        CurrencyCommands::Parse { text } => {
            let amount = parse_currency(text).map_err(|e| TallyError::Parse(e.to_string()))?;
            Ok(format!("{}.{:02}", amount.units(), amount.cents_part()))
        }
        CurrencyCommands::Format { amount } => {
            let value: f64 = amount
                .trim()
                .parse()
                .map_err(|_| TallyError::Parse(format!("Not a decimal amount: '{}'", amount)))?;
            if !value.is_finite() {
                return Err(TallyError::Parse(format!("Not a decimal amount: '{}'", amount)));
            }
            let cents = Money::try_from_decimal(value)
                .ok_or_else(|| TallyError::Parse(format!("Amount too large: '{}'", amount)))?;
            Ok(format_currency(cents, &settings.locale.currency()))
        }
    }
}
