//! Core data models for Tally
//!
//! This module contains the data structures handled by the transaction and
//! budget forms: money amounts and their display locales, repeating
//! transaction series, and budget limit selections.

pub mod allocation;
pub mod locale;
pub mod money;
pub mod recurrence;

pub use allocation::{
    AllocationRequest, AllocationResult, AllocationValidationError, CategoryAllocation,
    CategoryCentShare, CategorySelection, CentAllocation, SubCategoryAllocation,
    SubCategoryCentShare, SubCategorySelection,
};
pub use locale::{CurrencyLocale, LocaleTag};
pub use money::{Money, MoneyParseError};
pub use recurrence::{Frequency, MonthOverflow, RecurrenceSpec, RecurrenceValidationError};
