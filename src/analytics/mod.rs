//! The aggregation engine: filtering, sorting and derived statistics over
//! expense records.
//!
//! Everything in this module is a pure function over in-memory collections;
//! "now"-anchored date windows take the caller's local date as an argument so
//! the calendar math stays testable.

mod breakdown;
mod filter;
mod summary;

pub use breakdown::{CategorySlice, IncomeSlice, category_breakdown, income_breakdown};
pub use filter::{
    ExpenseFilter, FilterQuery, RangeFilter, RangePreset, filter_expenses, sort_by_date_descending,
};
pub use summary::{Summary, compute_summary};
