//! Derived View Model
//!
//! Pure functions from `(records, today)` to what the table shows:
//! display status, deadline flags, summary stats and column order.

mod derive;
mod rules;
mod sort;
pub mod stats;

use chrono::NaiveDate;

pub use derive::{
    days_until, deadline_flags, derive_status, status_tone, DeadlineFlags, DeadlineKind, DeadlineRule,
    DerivedStatus, Tone, EXPIRING_WINDOW_DAYS,
};
pub use rules::Derive;
pub use sort::{sort_records, SortSpec};
pub use stats::{Stat, StatValue};

/// One table row: the record plus everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<'a, T> {
    pub record: &'a T,
    pub status: DerivedStatus,
    pub flags: DeadlineFlags,
}

pub fn row_view<T: Derive>(record: &T, today: NaiveDate) -> RowView<'_, T> {
    let rule = T::deadline();
    RowView {
        record,
        status: derive_status(record, rule.as_ref(), today),
        flags: deadline_flags(record, rule.as_ref(), today),
    }
}

/// Derive rows for an already filtered and sorted slice
pub fn rows<'a, T: Derive>(records: &[&'a T], today: NaiveDate) -> Vec<RowView<'a, T>> {
    let rule = T::deadline();
    records
        .iter()
        .map(|record| RowView {
            record: *record,
            status: derive_status(*record, rule.as_ref(), today),
            flags: deadline_flags(*record, rule.as_ref(), today),
        })
        .collect()
}
