//! Calendar arithmetic
//!
//! Adds a number of day, week, month or year periods to a calendar date and
//! parses user-entered dates. Dates are plain calendar dates; no time zone
//! is involved.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{TallyError, TallyResult};
use crate::models::{Frequency, MonthOverflow};

/// ISO-8601 calendar date format, always accepted as a fallback
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Add `count` periods of `frequency` to `date`
///
/// Month and year steps keep the day-of-month; when the target month is
/// shorter, `overflow` decides between spilling into the next month and
/// clamping to the month's last day.
pub fn add_periods(
    date: NaiveDate,
    count: u64,
    frequency: Frequency,
    overflow: MonthOverflow,
) -> TallyResult<NaiveDate> {
    let result = match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(count)),
        Frequency::Weekly => count
            .checked_mul(7)
            .and_then(|days| date.checked_add_days(Days::new(days))),
        Frequency::Monthly => add_months(date, count, overflow),
        Frequency::Yearly => count
            .checked_mul(12)
            .and_then(|months| add_months(date, months, overflow)),
    };

    result.ok_or_else(|| {
        TallyError::InvalidArgument(format!(
            "{} plus {} {}(s) is outside the supported calendar range",
            date,
            count,
            frequency.unit()
        ))
    })
}

fn add_months(date: NaiveDate, months: u64, overflow: MonthOverflow) -> Option<NaiveDate> {
    let months = i64::try_from(months).ok()?;
    let index = i64::from(date.year())
        .checked_mul(12)?
        .checked_add(i64::from(date.month0()))?
        .checked_add(months)?;

    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day();

    match overflow {
        MonthOverflow::Clamp => {
            NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
        }
        MonthOverflow::Overflow => NaiveDate::from_ymd_opt(year, month, 1)?
            .checked_add_days(Days::new(u64::from(day - 1))),
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}

/// Parse a user-entered date
///
/// The configured display format is tried first, then ISO `YYYY-MM-DD`.
pub fn parse_date(input: &str, format: &str) -> TallyResult<NaiveDate> {
    let input = input.trim();

    NaiveDate::parse_from_str(input, format)
        .or_else(|_| NaiveDate::parse_from_str(input, ISO_DATE_FORMAT))
        .map_err(|_| TallyError::InvalidArgument(format!("Not a valid date: '{}'", input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_days_and_weeks() {
        let start = date(2024, 1, 1);
        assert_eq!(
            add_periods(start, 4, Frequency::Daily, MonthOverflow::Overflow).unwrap(),
            date(2024, 1, 5)
        );
        assert_eq!(
            add_periods(start, 2, Frequency::Weekly, MonthOverflow::Overflow).unwrap(),
            date(2024, 1, 15)
        );
        assert_eq!(
            add_periods(date(2023, 12, 30), 3, Frequency::Daily, MonthOverflow::Clamp).unwrap(),
            date(2024, 1, 2)
        );
    }

    #[test]
    fn test_add_zero_is_identity() {
        let start = date(2024, 2, 29);
        for frequency in [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
        ] {
            assert_eq!(
                add_periods(start, 0, frequency, MonthOverflow::Overflow).unwrap(),
                start
            );
        }
    }

    #[test]
    fn test_month_overflow_spills_into_next_month() {
        assert_eq!(
            add_periods(date(2024, 1, 31), 1, Frequency::Monthly, MonthOverflow::Overflow)
                .unwrap(),
            date(2024, 3, 2)
        );
        assert_eq!(
            add_periods(date(2023, 1, 31), 1, Frequency::Monthly, MonthOverflow::Overflow)
                .unwrap(),
            date(2023, 3, 3)
        );
        assert_eq!(
            add_periods(date(2024, 3, 31), 1, Frequency::Monthly, MonthOverflow::Overflow)
                .unwrap(),
            date(2024, 5, 1)
        );
    }

    #[test]
    fn test_month_clamp_snaps_to_last_day() {
        assert_eq!(
            add_periods(date(2024, 1, 31), 1, Frequency::Monthly, MonthOverflow::Clamp).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            add_periods(date(2023, 1, 31), 1, Frequency::Monthly, MonthOverflow::Clamp).unwrap(),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn test_months_cross_year_boundary() {
        assert_eq!(
            add_periods(date(2024, 11, 15), 3, Frequency::Monthly, MonthOverflow::Overflow)
                .unwrap(),
            date(2025, 2, 15)
        );
        assert_eq!(
            add_periods(date(2024, 1, 10), 25, Frequency::Monthly, MonthOverflow::Clamp).unwrap(),
            date(2026, 2, 10)
        );
    }

    #[test]
    fn test_leap_day_plus_one_year() {
        let leap_day = date(2024, 2, 29);
        assert_eq!(
            add_periods(leap_day, 1, Frequency::Yearly, MonthOverflow::Overflow).unwrap(),
            date(2025, 3, 1)
        );
        assert_eq!(
            add_periods(leap_day, 1, Frequency::Yearly, MonthOverflow::Clamp).unwrap(),
            date(2025, 2, 28)
        );
        assert_eq!(
            add_periods(leap_day, 4, Frequency::Yearly, MonthOverflow::Overflow).unwrap(),
            leap_day.with_year(2028).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_is_invalid_argument() {
        let err = add_periods(date(2024, 1, 1), u64::MAX, Frequency::Weekly, MonthOverflow::Overflow)
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = add_periods(NaiveDate::MAX, 1, Frequency::Yearly, MonthOverflow::Clamp)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("15/03/2024", "%d/%m/%Y").unwrap(), date(2024, 3, 15));
        assert_eq!(parse_date(" 2024-03-15 ", "%d/%m/%Y").unwrap(), date(2024, 3, 15));
        assert!(parse_date("2024-02-30", "%d/%m/%Y").unwrap_err().is_invalid_argument());
        assert!(parse_date("tomorrow", ISO_DATE_FORMAT).unwrap_err().is_invalid_argument());
    }
}
