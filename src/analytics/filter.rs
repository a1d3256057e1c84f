//! Multi-criteria expense filtering and date-window resolution.

use serde::Deserialize;
use time::{Date, Duration, Month};

use crate::{category::Category, ledger::Expense};

/// The query parameters accepted by the pages that filter expenses.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// The category slug to filter by, or "all".
    pub category: Option<String>,
    /// The date-range preset to filter by.
    pub range: Option<RangePreset>,
    /// The inclusive start date for the custom range.
    pub start: Option<Date>,
    /// The inclusive end date for the custom range.
    pub end: Option<Date>,
}

impl FilterQuery {
    /// The range preset in effect, defaulting to [RangePreset::All].
    pub fn range_preset(&self) -> RangePreset {
        self.range.unwrap_or(RangePreset::All)
    }

    /// The category in effect, where `None` (or the "all" sentinel) imposes no
    /// constraint.
    pub fn selected_category(&self) -> Option<Category> {
        match self.category.as_deref() {
            None | Some("all") | Some("") => None,
            Some(slug) => Some(Category::from_slug(slug)),
        }
    }

    /// Build the filter criteria for `budget_id` from these query parameters.
    pub fn to_filter(&self, budget_id: Option<String>) -> ExpenseFilter {
        ExpenseFilter {
            budget_id,
            category: self.selected_category(),
            range: self.range_preset().to_range_filter(self.start, self.end),
        }
    }
}

/// The date-range presets offered by the filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePreset {
    /// No date constraint.
    All,
    /// The most recent Sunday through today.
    ThisWeek,
    /// The first of the current month through today.
    ThisMonth,
    /// The whole previous calendar month.
    LastMonth,
    /// A caller-supplied inclusive start/end pair.
    Custom,
}

impl RangePreset {
    /// Every preset in display order.
    pub fn all_presets() -> [RangePreset; 5] {
        [
            Self::All,
            Self::ThisWeek,
            Self::ThisMonth,
            Self::LastMonth,
            Self::Custom,
        ]
    }

    /// The value used in query strings and the filter form.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ThisWeek => "this-week",
            Self::ThisMonth => "this-month",
            Self::LastMonth => "last-month",
            Self::Custom => "custom",
        }
    }

    /// The label shown in the filter form.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All time",
            Self::ThisWeek => "This week",
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
            Self::Custom => "Custom range",
        }
    }

    /// Attach the custom bounds to produce the resolved range criterion.
    pub fn to_range_filter(self, start: Option<Date>, end: Option<Date>) -> RangeFilter {
        match self {
            Self::All => RangeFilter::All,
            Self::ThisWeek => RangeFilter::ThisWeek,
            Self::ThisMonth => RangeFilter::ThisMonth,
            Self::LastMonth => RangeFilter::LastMonth,
            Self::Custom => RangeFilter::Custom { start, end },
        }
    }
}

/// A date-range criterion, resolved against the caller's local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFilter {
    /// No date constraint.
    All,
    /// The most recent Sunday through today.
    ThisWeek,
    /// The first of the current month through today.
    ThisMonth,
    /// The whole previous calendar month.
    LastMonth,
    /// An inclusive start/end pair. A missing bound makes the criterion a
    /// deliberate no-op rather than an error.
    Custom {
        /// The inclusive start date.
        start: Option<Date>,
        /// The inclusive end date.
        end: Option<Date>,
    },
}

impl Default for RangeFilter {
    fn default() -> Self {
        Self::All
    }
}

impl RangeFilter {
    /// Resolve the criterion to inclusive date bounds, anchored to `today`.
    ///
    /// `None` means the criterion imposes no constraint.
    pub fn bounds(self, today: Date) -> Option<(Date, Date)> {
        match self {
            Self::All => None,
            Self::ThisWeek => {
                let days_since_sunday = today.weekday().number_days_from_sunday() as i64;
                Some((today - Duration::days(days_since_sunday), today))
            }
            Self::ThisMonth => Some((first_of_month(today.year(), today.month()), today)),
            Self::LastMonth => {
                let (year, month) = previous_month(today.year(), today.month());
                Some((
                    first_of_month(year, month),
                    Date::from_calendar_date(year, month, last_day_of_month(year, month))
                        .expect("invalid month end date"),
                ))
            }
            Self::Custom { start, end } => match (start, end) {
                (Some(start), Some(end)) => Some((start, end)),
                _ => None,
            },
        }
    }
}

/// The criteria an expense must satisfy to pass the filter.
///
/// Criteria combine with logical AND; an absent criterion imposes no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    /// Keep only expenses logged against this budget.
    pub budget_id: Option<String>,
    /// Keep only expenses in this category.
    pub category: Option<Category>,
    /// Keep only expenses whose date falls in this window.
    pub range: RangeFilter,
}

/// Return the subset of `expenses` satisfying every criterion in `filter`,
/// in their original order.
///
/// Date windows are anchored to `today`, the caller's local calendar date.
pub fn filter_expenses(expenses: &[Expense], filter: &ExpenseFilter, today: Date) -> Vec<Expense> {
    let bounds = filter.range.bounds(today);

    expenses
        .iter()
        .filter(|expense| {
            if let Some(budget_id) = &filter.budget_id
                && expense.budget_id.as_deref() != Some(budget_id.as_str())
            {
                return false;
            }

            if let Some(category) = filter.category
                && expense.category != category
            {
                return false;
            }

            if let Some((start, end)) = bounds
                && (expense.date < start || expense.date > end)
            {
                return false;
            }

            true
        })
        .cloned()
        .collect()
}

/// Sort expenses by date, most recent first.
///
/// The sort is stable, so same-day expenses keep their relative order.
pub fn sort_by_date_descending(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
    expenses
}

fn first_of_month(year: i32, month: Month) -> Date {
    Date::from_calendar_date(year, month, 1).expect("invalid month start date")
}

fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        _ => (year, month.previous()),
    }
}

pub(super) fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod filter_tests {
    use time::macros::date;

    use super::{ExpenseFilter, RangeFilter, filter_expenses, sort_by_date_descending};
    use crate::{category::Category, ledger::Expense};

    fn expense(id: &str, budget_id: Option<&str>, category: Category, date: time::Date) -> Expense {
        Expense {
            id: id.to_owned(),
            budget_id: budget_id.map(str::to_owned),
            label: format!("Expense {id}"),
            amount: 10.0,
            category,
            date,
        }
    }

    #[test]
    fn this_week_starts_on_the_most_recent_sunday() {
        // 2024-03-15 was a Friday; the week began on Sunday the 10th.
        let bounds = RangeFilter::ThisWeek.bounds(date!(2024 - 03 - 15));

        assert_eq!(bounds, Some((date!(2024 - 03 - 10), date!(2024 - 03 - 15))));
    }

    #[test]
    fn this_week_on_a_sunday_starts_today() {
        let bounds = RangeFilter::ThisWeek.bounds(date!(2024 - 03 - 10));

        assert_eq!(bounds, Some((date!(2024 - 03 - 10), date!(2024 - 03 - 10))));
    }

    #[test]
    fn this_month_runs_from_the_first_through_today() {
        let bounds = RangeFilter::ThisMonth.bounds(date!(2024 - 03 - 15));

        assert_eq!(bounds, Some((date!(2024 - 03 - 01), date!(2024 - 03 - 15))));
    }

    #[test]
    fn last_month_covers_the_whole_previous_month() {
        let bounds = RangeFilter::LastMonth.bounds(date!(2024 - 03 - 15));

        assert_eq!(bounds, Some((date!(2024 - 02 - 01), date!(2024 - 02 - 29))));
    }

    #[test]
    fn last_month_in_january_wraps_to_the_previous_year() {
        let bounds = RangeFilter::LastMonth.bounds(date!(2024 - 01 - 10));

        assert_eq!(bounds, Some((date!(2023 - 12 - 01), date!(2023 - 12 - 31))));
    }

    #[test]
    fn custom_range_with_a_missing_bound_is_a_no_op() {
        let today = date!(2024 - 03 - 15);

        let filter = RangeFilter::Custom {
            start: Some(date!(2024 - 03 - 01)),
            end: None,
        };

        assert_eq!(filter.bounds(today), None);
    }

    #[test]
    fn criteria_combine_with_logical_and() {
        let expenses = vec![
            expense("1", Some("budget-a"), Category::Food, date!(2024 - 03 - 02)),
            expense("2", Some("budget-a"), Category::Housing, date!(2024 - 03 - 02)),
            expense("3", Some("budget-b"), Category::Food, date!(2024 - 03 - 02)),
            expense("4", Some("budget-a"), Category::Food, date!(2024 - 01 - 02)),
        ];
        let filter = ExpenseFilter {
            budget_id: Some("budget-a".to_owned()),
            category: Some(Category::Food),
            range: RangeFilter::Custom {
                start: Some(date!(2024 - 03 - 01)),
                end: Some(date!(2024 - 03 - 31)),
            },
        };

        let filtered = filter_expenses(&expenses, &filter, date!(2024 - 03 - 15));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn absent_criteria_impose_no_constraint() {
        let expenses = vec![
            expense("1", Some("budget-a"), Category::Food, date!(2024 - 03 - 02)),
            expense("2", None, Category::Housing, date!(2020 - 01 - 01)),
        ];

        let filtered = filter_expenses(&expenses, &ExpenseFilter::default(), date!(2024 - 03 - 15));

        assert_eq!(filtered, expenses);
    }

    #[test]
    fn orphaned_expenses_never_match_a_budget_filter() {
        let expenses = vec![
            expense("1", None, Category::Food, date!(2024 - 03 - 02)),
            expense("2", Some("budget-a"), Category::Food, date!(2024 - 03 - 02)),
        ];
        let filter = ExpenseFilter {
            budget_id: Some("budget-a".to_owned()),
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &filter, date!(2024 - 03 - 15));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn filtering_is_idempotent() {
        let expenses = vec![
            expense("1", Some("budget-a"), Category::Food, date!(2024 - 03 - 02)),
            expense("2", Some("budget-a"), Category::Housing, date!(2024 - 03 - 05)),
            expense("3", Some("budget-b"), Category::Food, date!(2024 - 02 - 20)),
        ];
        let filter = ExpenseFilter {
            budget_id: Some("budget-a".to_owned()),
            category: None,
            range: RangeFilter::ThisMonth,
        };
        let today = date!(2024 - 03 - 15);

        let once = filter_expenses(&expenses, &filter, today);
        let twice = filter_expenses(&once, &filter, today);

        assert_eq!(once, twice);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let expenses = vec![
            expense("1", None, Category::Food, date!(2024 - 03 - 01)),
            expense("2", None, Category::Food, date!(2024 - 03 - 31)),
            expense("3", None, Category::Food, date!(2024 - 04 - 01)),
        ];
        let filter = ExpenseFilter {
            range: RangeFilter::Custom {
                start: Some(date!(2024 - 03 - 01)),
                end: Some(date!(2024 - 03 - 31)),
            },
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &filter, date!(2024 - 04 - 15));

        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn sort_by_date_descending_is_stable() {
        let expenses = vec![
            expense("1", None, Category::Food, date!(2024 - 03 - 01)),
            expense("2", None, Category::Food, date!(2024 - 03 - 10)),
            expense("3", None, Category::Food, date!(2024 - 03 - 10)),
            expense("4", None, Category::Food, date!(2024 - 02 - 01)),
        ];

        let sorted = sort_by_date_descending(expenses);

        let ids: Vec<&str> = sorted.iter().map(|expense| expense.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1", "4"]);
    }
}
