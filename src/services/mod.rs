//! Service layer for Tally
//!
//! The service layer holds the calendar and distribution arithmetic behind
//! the transaction and budget forms. The free functions are pure; the
//! services bind them to the user's settings.

pub mod allocation;
pub mod calendar;
pub mod recurrence;

pub use allocation::{allocate_evenly, allocate_evenly_cents, AllocationService};
pub use calendar::{add_periods, parse_date};
pub use recurrence::{
    compute_end_date, compute_end_date_with, occurrence_dates, RecurrencePayload,
    RecurrenceService,
};
