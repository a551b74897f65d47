//! Repeat CLI command
//!
//! Computes the schedule of a repeating transaction from the values of the
//! transaction form.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::{format_occurrence_table, format_schedule_summary, OutputFormat};
use crate::error::{TallyError, TallyResult};
use crate::models::{Frequency, MonthOverflow};
use crate::services::calendar::ISO_DATE_FORMAT;
use crate::services::RecurrenceService;

/// Arguments of `tally repeat`
#[derive(Args, Debug)]
pub struct RepeatArgs {
    /// First occurrence (configured date format or YYYY-MM-DD)
    pub start: String,

    /// Total number of occurrences, including the first
    #[arg(short = 'n', long)]
    pub times: u32,

    /// Period units between occurrences
    #[arg(short, long, default_value_t = 1)]
    pub every: u32,

    /// Period unit: daily, weekly, monthly, yearly
    #[arg(short, long, default_value = "monthly")]
    pub unit: Frequency,

    /// Clamp to the end of shorter months instead of spilling over
    #[arg(long)]
    pub clamp: bool,

    /// List every occurrence, not just the last one
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Handle `tally repeat`
pub fn handle_repeat_command(settings: &Settings, args: RepeatArgs) -> TallyResult<()> {
    print!("{}", render_repeat(settings, &args)?);
    Ok(())
}

/// Compute and render the schedule described by `args`
pub fn render_repeat(settings: &Settings, args: &RepeatArgs) -> TallyResult<String> {
    let mut settings = settings.clone();
    if args.clamp {
        settings.month_overflow = MonthOverflow::Clamp;
    }

    let service = RecurrenceService::new(&settings);
    let spec = service.build_spec(&args.start, args.every, args.unit, args.times)?;

    match args.format {
        OutputFormat::Table => {
            let end = service.end_date(&spec)?;
            let mut output = format_schedule_summary(&spec, end, &settings.date_format);
            output.push('\n');
            if args.all {
                let dates = service.occurrences(&spec)?;
                output.push_str(&format_occurrence_table(&dates, &settings.date_format));
                output.push('\n');
            }
            Ok(output)
        }
        OutputFormat::Json => {
            let payload = service.payload(&spec)?;
            let json = if args.all {
                let dates: Vec<String> = service
                    .occurrences(&spec)?
                    .iter()
                    .map(|d| d.format(ISO_DATE_FORMAT).to_string())
                    .collect();
                let mut value = serde_json::to_value(&payload)?;
                value["occurrences"] = serde_json::json!(dates);
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string_pretty(&payload)?
            };
            Ok(format!("{}\n", json))
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer
                .write_record(["occurrence", "date"])
                .map_err(|e| TallyError::Export(e.to_string()))?;

            let dates = if args.all {
                service.occurrences(&spec)?
            } else {
                vec![service.end_date(&spec)?]
            };
            let first = if args.all { 1 } else { spec.total_occurrences as usize };

            for (i, date) in dates.iter().enumerate() {
                writer
                    .write_record([
                        (first + i).to_string(),
                        date.format(ISO_DATE_FORMAT).to_string(),
                    ])
                    .map_err(|e| TallyError::Export(e.to_string()))?;
            }

            let bytes = writer
                .into_inner()
                .map_err(|e| TallyError::Export(e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| TallyError::Export(e.to_string()))
        }
    }
}
