//! Recurrence service
//!
//! Computes the dates of a repeating transaction series and the repetition
//! fields sent along with the transaction when it is created.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::settings::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::{Frequency, MonthOverflow, RecurrenceSpec};
use crate::services::calendar::{add_periods, parse_date, ISO_DATE_FORMAT};

/// Date of the last occurrence, using month overflow semantics
pub fn compute_end_date(spec: &RecurrenceSpec) -> TallyResult<NaiveDate> {
    compute_end_date_with(spec, MonthOverflow::default())
}

/// Date of the last occurrence
///
/// Adds `(total_occurrences - 1) * interval` periods to the start date. The
/// counts are not range-checked here; see [`RecurrenceSpec::validate`].
pub fn compute_end_date_with(
    spec: &RecurrenceSpec,
    overflow: MonthOverflow,
) -> TallyResult<NaiveDate> {
    let end = add_periods(spec.start_date, spec.periods_to_add(), spec.frequency, overflow)?;
    debug!(%spec, %end, ?overflow, "computed repetition end date");
    Ok(end)
}

/// Every occurrence date of the series, first to last
///
/// Each date is offset from the start date rather than from the previous
/// occurrence, so a series starting on the 31st returns to the 31st in
/// every month that has one.
pub fn occurrence_dates(
    spec: &RecurrenceSpec,
    overflow: MonthOverflow,
) -> TallyResult<Vec<NaiveDate>> {
    let count = spec.total_occurrences.max(1);
    (0..u64::from(count))
        .map(|i| {
            add_periods(
                spec.start_date,
                i * u64::from(spec.interval),
                spec.frequency,
                overflow,
            )
        })
        .collect()
}

/// Repetition fields of a transaction creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePayload {
    pub is_repeat: bool,
    pub repetition_interval: u32,
    pub repetition_frequency: Frequency,
    pub repetition_count: u32,
    /// ISO-8601 date
    pub repetition_start_date: String,
    /// ISO-8601 date
    pub repetition_end_date: String,
}

impl RecurrencePayload {
    pub fn from_spec(spec: &RecurrenceSpec, overflow: MonthOverflow) -> TallyResult<Self> {
        let end = compute_end_date_with(spec, overflow)?;
        Ok(Self {
            is_repeat: true,
            repetition_interval: spec.interval,
            repetition_frequency: spec.frequency,
            repetition_count: spec.total_occurrences,
            repetition_start_date: spec.start_date.format(ISO_DATE_FORMAT).to_string(),
            repetition_end_date: end.format(ISO_DATE_FORMAT).to_string(),
        })
    }

    /// Rebuild the series from a payload, e.g. one read back from a request log
    ///
    /// The stored end date must match the one the series produces under
    /// `overflow`.
    pub fn to_spec(&self, overflow: MonthOverflow) -> TallyResult<RecurrenceSpec> {
        let parse = |field: &str, text: &str| {
            NaiveDate::parse_from_str(text, ISO_DATE_FORMAT).map_err(|e| {
                TallyError::InvalidArgument(format!(
                    "Invalid repetition {} date '{}': {}",
                    field, text, e
                ))
            })
        };
        let start = parse("start", &self.repetition_start_date)?;
        let stored_end = parse("end", &self.repetition_end_date)?;

        let spec = RecurrenceSpec::new(
            start,
            self.repetition_interval,
            self.repetition_frequency,
            self.repetition_count,
        );
        let end = compute_end_date_with(&spec, overflow)?;
        if end != stored_end {
            return Err(TallyError::InvalidArgument(format!(
                "Repetition end date {} does not match the series, which ends on {}",
                self.repetition_end_date,
                end.format(ISO_DATE_FORMAT)
            )));
        }
        Ok(spec)
    }
}

/// Service that builds and evaluates series according to user preferences
pub struct RecurrenceService<'a> {
    settings: &'a Settings,
}

impl<'a> RecurrenceService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Build a series from form input, applying the occurrence range check
    pub fn build_spec(
        &self,
        start: &str,
        interval: u32,
        frequency: Frequency,
        total_occurrences: u32,
    ) -> TallyResult<RecurrenceSpec> {
        let start_date = parse_date(start, &self.settings.date_format)?;
        let spec = RecurrenceSpec::new(start_date, interval, frequency, total_occurrences);

        spec.validate(self.settings.max_occurrences)
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        Ok(spec)
    }

    pub fn end_date(&self, spec: &RecurrenceSpec) -> TallyResult<NaiveDate> {
        compute_end_date_with(spec, self.settings.month_overflow)
    }

    pub fn occurrences(&self, spec: &RecurrenceSpec) -> TallyResult<Vec<NaiveDate>> {
        occurrence_dates(spec, self.settings.month_overflow)
    }

    pub fn payload(&self, spec: &RecurrenceSpec) -> TallyResult<RecurrencePayload> {
        RecurrencePayload::from_spec(spec, self.settings.month_overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_occurrence_ends_on_start() {
        let start = date(2024, 1, 31);
        for frequency in [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
        ] {
            for interval in [1, 3, 12] {
                let spec = RecurrenceSpec::new(start, interval, frequency, 1);
                assert_eq!(compute_end_date(&spec).unwrap(), start);
            }
        }
    }

    #[test]
    fn test_daily_series() {
        let spec = RecurrenceSpec::every(date(2024, 1, 1), Frequency::Daily, 5);
        assert_eq!(compute_end_date(&spec).unwrap(), date(2024, 1, 5));
    }

    #[test]
    fn test_weekly_series() {
        let spec = RecurrenceSpec::every(date(2024, 1, 1), Frequency::Weekly, 3);
        assert_eq!(compute_end_date(&spec).unwrap(), date(2024, 1, 15));
    }

    #[test]
    fn test_monthly_rollover_pinned() {
        let spec = RecurrenceSpec::every(date(2024, 1, 31), Frequency::Monthly, 2);
        assert_eq!(compute_end_date(&spec).unwrap(), date(2024, 3, 2));
        assert_eq!(
            compute_end_date_with(&spec, MonthOverflow::Clamp).unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_yearly_from_leap_day() {
        let spec = RecurrenceSpec::every(date(2024, 2, 29), Frequency::Yearly, 2);
        assert_eq!(compute_end_date(&spec).unwrap(), date(2025, 3, 1));
    }

    #[test]
    fn test_interval_multiplies_periods() {
        let spec = RecurrenceSpec::new(date(2024, 1, 15), 3, Frequency::Monthly, 4);
        assert_eq!(compute_end_date(&spec).unwrap(), date(2024, 10, 15));
    }

    #[test]
    fn test_end_not_before_start() {
        let start = date(2024, 5, 31);
        for n in 1..=24 {
            let spec = RecurrenceSpec::every(start, Frequency::Monthly, n);
            assert!(compute_end_date(&spec).unwrap() >= start);
        }
    }

    #[test]
    fn test_occurrence_dates() {
        let spec = RecurrenceSpec::every(date(2024, 1, 31), Frequency::Monthly, 4);
        let dates = occurrence_dates(&spec, MonthOverflow::Clamp).unwrap();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
            ]
        );

        let end = compute_end_date_with(&spec, MonthOverflow::Clamp).unwrap();
        assert_eq!(dates.last(), Some(&end));
    }

    #[test]
    fn test_occurrence_dates_single() {
        let spec = RecurrenceSpec::every(date(2024, 6, 1), Frequency::Weekly, 1);
        let dates = occurrence_dates(&spec, MonthOverflow::Overflow).unwrap();
        assert_eq!(dates, vec![date(2024, 6, 1)]);
    }

    #[test]
    fn test_payload() {
        let spec = RecurrenceSpec::every(date(2024, 1, 1), Frequency::Weekly, 3);
        let payload = RecurrencePayload::from_spec(&spec, MonthOverflow::Overflow).unwrap();
        assert_eq!(payload.repetition_end_date, "2024-01-15");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["isRepeat"], true);
        assert_eq!(json["repetitionFrequency"], "WEEKLY");
        assert_eq!(json["repetitionCount"], 3);
        assert_eq!(json["repetitionStartDate"], "2024-01-01");
        assert_eq!(json["repetitionEndDate"], "2024-01-15");

        assert_eq!(payload.to_spec(MonthOverflow::Overflow).unwrap(), spec);
    }

    #[test]
    fn test_payload_with_bad_start_date() {
        let payload = RecurrencePayload {
            is_repeat: true,
            repetition_interval: 1,
            repetition_frequency: Frequency::Daily,
            repetition_count: 2,
            repetition_start_date: "31/01/2024".into(),
            repetition_end_date: "2024-02-01".into(),
        };
        assert!(payload
            .to_spec(MonthOverflow::Overflow)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_payload_with_mismatched_end_date() {
        let spec = RecurrenceSpec::every(date(2024, 1, 31), Frequency::Monthly, 2);
        let mut payload = RecurrencePayload::from_spec(&spec, MonthOverflow::Overflow).unwrap();
        assert_eq!(payload.repetition_end_date, "2024-03-02");

        // Same payload read back under clamp semantics ends on 2024-02-29
        let err = payload.to_spec(MonthOverflow::Clamp).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("2024-02-29"));

        payload.repetition_end_date = "2024-03-03".into();
        assert!(payload
            .to_spec(MonthOverflow::Overflow)
            .unwrap_err()
            .is_invalid_argument());

        payload.repetition_end_date = "not a date".into();
        assert!(payload
            .to_spec(MonthOverflow::Overflow)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_service_builds_and_validates() {
        let settings = Settings::default();
        let service = RecurrenceService::new(&settings);

        let spec = service
            .build_spec("31/01/2024", 1, Frequency::Monthly, 2)
            .unwrap();
        assert_eq!(spec.start_date, date(2024, 1, 31));
        assert_eq!(service.end_date(&spec).unwrap(), date(2024, 3, 2));

        let err = service
            .build_spec("2024-01-01", 1, Frequency::Daily, 366)
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .build_spec("31/02/2024", 1, Frequency::Daily, 2)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_service_uses_configured_overflow() {
        let settings = Settings {
            month_overflow: MonthOverflow::Clamp,
            ..Settings::default()
        };
        let service = RecurrenceService::new(&settings);
        let spec = RecurrenceSpec::every(date(2024, 1, 31), Frequency::Monthly, 2);

        assert_eq!(service.end_date(&spec).unwrap(), date(2024, 2, 29));
        assert_eq!(
            service.payload(&spec).unwrap().repetition_end_date,
            "2024-02-29"
        );
        assert_eq!(service.occurrences(&spec).unwrap().len(), 2);
    }
}
