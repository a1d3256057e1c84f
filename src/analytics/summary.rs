//! Derived statistics over a collection of expenses.

use time::Date;

use crate::ledger::Expense;

use super::filter::last_day_of_month;

/// Headline statistics for a collection of expenses.
///
/// Every field is exactly zero for an empty collection; no division by zero
/// and no NaN values ever leave this module.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The number of expenses.
    pub count: usize,
    /// The sum of all amounts.
    pub total_spent: f64,
    /// The mean amount, or 0 when there are no expenses.
    pub average: f64,
    /// The largest single amount, or 0 when there are no expenses.
    pub largest: f64,
    /// The current calendar month's spending divided by the number of days in
    /// that month.
    ///
    /// Always computed against the month containing `today`, regardless of
    /// any date-range filter applied to the input elsewhere.
    pub daily_average_this_month: f64,
}

/// Compute the [Summary] statistics for `expenses`, with `today` anchoring
/// the current-month daily average.
pub fn compute_summary(expenses: &[Expense], today: Date) -> Summary {
    let count = expenses.len();
    let total_spent: f64 = expenses.iter().map(|expense| expense.amount).sum();

    let average = if count > 0 {
        total_spent / count as f64
    } else {
        0.0
    };

    let largest = expenses
        .iter()
        .map(|expense| expense.amount)
        .fold(0.0, f64::max);

    let month_total: f64 = expenses
        .iter()
        .filter(|expense| {
            expense.date.year() == today.year() && expense.date.month() == today.month()
        })
        .map(|expense| expense.amount)
        .sum();
    let days_in_month = last_day_of_month(today.year(), today.month()) as f64;

    Summary {
        count,
        total_spent,
        average,
        largest,
        daily_average_this_month: month_total / days_in_month,
    }
}
