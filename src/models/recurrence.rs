//! Recurring transaction model
//!
//! A transaction marked as "repeat" on the entry form carries a start date,
//! a period unit, how many units separate two occurrences, and how many
//! occurrences there are in total (the first one included).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Period unit between two occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Singular unit noun, used in "every 2 months" style labels
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "days" | "d" => Ok(Self::Daily),
            "weekly" | "week" | "weeks" | "w" => Ok(Self::Weekly),
            "monthly" | "month" | "months" | "m" => Ok(Self::Monthly),
            "yearly" | "year" | "years" | "annual" | "y" => Ok(Self::Yearly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

/// How month and year arithmetic treats a day-of-month missing from the
/// target month (e.g. the 31st)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthOverflow {
    /// Excess days spill into the following month: Jan 31 + 1 month = Mar 2 (leap year)
    #[default]
    Overflow,
    /// Snap to the last day of the target month: Jan 31 + 1 month = Feb 29 (leap year)
    Clamp,
}

/// A repeating transaction series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    /// First occurrence
    pub start_date: NaiveDate,

    /// Number of period units between occurrences
    pub interval: u32,

    /// The period unit
    pub frequency: Frequency,

    /// Total number of occurrences, including the first
    pub total_occurrences: u32,
}

impl RecurrenceSpec {
    pub fn new(
        start_date: NaiveDate,
        interval: u32,
        frequency: Frequency,
        total_occurrences: u32,
    ) -> Self {
        Self {
            start_date,
            interval,
            frequency,
            total_occurrences,
        }
    }

    /// A series repeating once per period unit
    pub fn every(start_date: NaiveDate, frequency: Frequency, total_occurrences: u32) -> Self {
        Self::new(start_date, 1, frequency, total_occurrences)
    }

    /// Number of period units between the first and last occurrence
    ///
    /// Saturates, so an out-of-range zero count behaves like a single occurrence.
    pub fn periods_to_add(&self) -> u64 {
        u64::from(self.total_occurrences.saturating_sub(1)) * u64::from(self.interval)
    }

    /// Range checks performed by the form before the series is computed
    pub fn validate(&self, max_occurrences: u32) -> Result<(), RecurrenceValidationError> {
        if self.total_occurrences == 0 {
            return Err(RecurrenceValidationError::ZeroOccurrences);
        }

        if self.total_occurrences > max_occurrences {
            return Err(RecurrenceValidationError::TooManyOccurrences {
                max: max_occurrences,
            });
        }

        if self.interval == 0 {
            return Err(RecurrenceValidationError::ZeroInterval);
        }

        Ok(())
    }
}

impl fmt::Display for RecurrenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interval == 1 {
            write!(
                f,
                "{} x{} from {}",
                self.frequency, self.total_occurrences, self.start_date
            )
        } else {
            write!(
                f,
                "every {} {}s x{} from {}",
                self.interval,
                self.frequency.unit(),
                self.total_occurrences,
                self.start_date
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceValidationError {
    ZeroOccurrences,
    TooManyOccurrences { max: u32 },
    ZeroInterval,
}

impl fmt::Display for RecurrenceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroOccurrences => write!(f, "A repeating transaction needs at least 1 occurrence"),
            Self::TooManyOccurrences { max } => {
                write!(f, "A repeating transaction can have at most {} occurrences", max)
            }
            Self::ZeroInterval => write!(f, "Repeat interval must be at least 1"),
        }
    }
}

impl std::error::Error for RecurrenceValidationError {}
