//! Distribute CLI command
//!
//! Loads the state of a budget form (total limit plus category selections)
//! from a JSON or YAML file and splits the total evenly across it.

use clap::Args;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::config::settings::{AllocationMode, Settings};
use crate::display::{allocation_csv, format_allocation_table, OutputFormat};
use crate::error::{TallyError, TallyResult};
use crate::models::money::parse_currency;
use crate::models::AllocationRequest;
use crate::services::AllocationService;

/// Arguments of `tally distribute`
#[derive(Args, Debug)]
pub struct DistributeArgs {
    /// Budget form file (.json, .yaml, .yml), or "-" for JSON on stdin
    pub input: String,

    /// Override the total limit, as typed in the form (e.g. "R$ 5.000,00")
    #[arg(short, long)]
    pub total: Option<String>,

    /// Split in whole cents so shares add up to the total exactly
    #[arg(long)]
    pub cent_exact: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Handle `tally distribute`
pub fn handle_distribute_command(settings: &Settings, args: DistributeArgs) -> TallyResult<()> {
    let request = load_request(&args.input)?;
    print!("{}", render_distribution(settings, &args, request)?);
    Ok(())
}

/// Read a budget form from a file, or from stdin for "-"
pub fn load_request(input: &str) -> TallyResult<AllocationRequest> {
    if input == "-" {
        let mut contents = String::new();
        std::io::stdin().read_to_string(&mut contents)?;
        return parse_request(&contents, false);
    }

    let path = Path::new(input);
    let contents = std::fs::read_to_string(path)
        .map_err(|e| TallyError::Io(format!("Failed to read '{}': {}", input, e)))?;
    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    parse_request(&contents, is_yaml)
}

pub fn parse_request(contents: &str, is_yaml: bool) -> TallyResult<AllocationRequest> {
    if is_yaml {
        Ok(serde_yaml::from_str(contents)?)
    } else {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Distribute the request and render the outcome
pub fn render_distribution(
    settings: &Settings,
    args: &DistributeArgs,
    mut request: AllocationRequest,
) -> TallyResult<String> {
    if let Some(total) = &args.total {
        let amount =
            parse_currency(total).map_err(|e| TallyError::Parse(e.to_string()))?;
        request.total_amount = amount.to_decimal();
    }

    let mode = if args.cent_exact {
        AllocationMode::CentExact
    } else {
        settings.allocation_mode
    };

    let service = AllocationService::new(settings);
    let result = service.distribute_with(&request, mode)?;
    info!(
        categories = request.categories.len(),
        ?mode,
        "distributed budget limit"
    );

    match args.format {
        OutputFormat::Table => Ok(format_allocation_table(
            &request,
            &result,
            &settings.locale.currency(),
        )),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&result)?)),
        OutputFormat::Csv => allocation_csv(&request, &result),
    }
}
