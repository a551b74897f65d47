//! Repeating transaction display formatting

use chrono::{Datelike, NaiveDate};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::RecurrenceSpec;

#[derive(Tabled)]
struct OccurrenceRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weekday")]
    weekday: String,
}

/// One-line description of a series and its last occurrence
pub fn format_schedule_summary(spec: &RecurrenceSpec, end: NaiveDate, date_format: &str) -> String {
    format!(
        "{} occurrence(s), every {} {}(s), from {} to {}",
        spec.total_occurrences,
        spec.interval,
        spec.frequency.unit(),
        spec.start_date.format(date_format),
        end.format(date_format)
    )
}

/// Numbered table of occurrence dates
pub fn format_occurrence_table(dates: &[NaiveDate], date_format: &str) -> String {
    let rows: Vec<OccurrenceRow> = dates
        .iter()
        .enumerate()
        .map(|(i, date)| OccurrenceRow {
            number: i + 1,
            date: date.format(date_format).to_string(),
            weekday: date.weekday().to_string(),
        })
        .collect();

    Table::new(rows).with(Style::sharp()).to_string()
}
