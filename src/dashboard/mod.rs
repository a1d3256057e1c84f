//! Dashboard module
//!
//! Provides an overview page showing the active budget, headline statistics,
//! and the category and income breakdowns, filterable by category and date
//! range.

mod handlers;
mod view;

pub use handlers::get_dashboard_page;
