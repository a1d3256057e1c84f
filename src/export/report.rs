//! The paginated budget report document.
//!
//! Renders the same layout as the in-app overview (title block, summary,
//! income breakdown, expense table) as fixed-width text pages: a line cursor
//! advances down the page and spills onto a new page past the page height,
//! and every page gets a `Page i of n` footer.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use time::{Date, Month};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    analytics::sort_by_date_descending,
    endpoints,
    ledger::{Budget, Expense, Ledger},
    timezone::local_date_today,
};

/// Lines of content per page, excluding the footer.
const PAGE_HEIGHT_LINES: usize = 50;
/// Total width of a rendered line.
const PAGE_WIDTH: usize = 78;
/// Longest expense description rendered before truncation.
const LABEL_LIMIT: usize = 25;

const FOOTER_TAGLINE: &str = "Centsible - Manage your finances wisely";

/// The state needed for the report export.
#[derive(Debug, Clone)]
pub struct ExportReportState {
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Download the budget report as a text attachment.
///
/// With no active budget there is nothing to report, so the client is sent to
/// the dashboard instead.
pub async fn get_export_report(State(state): State<ExportReportState>) -> Result<Response, Error> {
    let today = local_date_today(&state.local_timezone)?;

    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let Some(budget) = ledger.active_budget() else {
        return Ok(Redirect::to(endpoints::DASHBOARD_VIEW).into_response());
    };

    let expenses: Vec<Expense> = ledger
        .expenses
        .iter()
        .filter(|expense| expense.budget_id.as_deref() == Some(budget.id.as_str()))
        .cloned()
        .collect();

    let body = render_report(budget, expenses, today);
    let file_name = format!("budget-{}-{today}.txt", slugify(&budget.name));

    let mut response = body.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    Ok(response)
}

/// Render the report for `budget` with `expenses`, dated `today`.
fn render_report(budget: &Budget, expenses: Vec<Expense>, today: Date) -> String {
    let currency = budget.currency;
    let total_spent: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let remaining = budget.amount - total_spent;
    let percentage_used = if budget.amount > 0.0 {
        (total_spent / budget.amount) * 100.0
    } else {
        0.0
    };

    let mut pages = PageBuilder::new();

    pages.center("Budget Report");
    pages.center(if budget.name.is_empty() {
        "Unnamed Budget"
    } else {
        &budget.name
    });
    pages.center(&format!("Generated on {}", long_date(today)));
    pages.blank();

    pages.line("Summary");
    pages.pair("Total Budget:", &currency.format(budget.amount));
    pages.pair("Total Spent:", &currency.format(total_spent));
    pages.pair("Remaining:", &currency.format(remaining));
    pages.pair("Budget Used:", &format!("{percentage_used:.1}%"));
    pages.blank();

    if !budget.income_sources.is_empty() {
        pages.line("Income Breakdown");
        for source in &budget.income_sources {
            pages.pair(&format!("{}:", source.name), &currency.format(source.amount));
        }
        pages.blank();
    }

    pages.line("Expenses");
    if expenses.is_empty() {
        pages.center("No expenses recorded yet.");
    } else {
        pages.line(&format!(
            "{:<12} {:<30} {:<18} {:>14}",
            "Date", "Description", "Category", "Amount"
        ));
        pages.line(&"-".repeat(PAGE_WIDTH));

        for expense in sort_by_date_descending(expenses) {
            pages.line(&format!(
                "{:<12} {:<30} {:<18} {:>14}",
                expense.date.to_string(),
                truncate_label(&expense.label),
                expense.category.label(),
                currency.format(expense.amount),
            ));
        }
    }

    pages.finish()
}

/// Accumulates lines into fixed-height pages.
struct PageBuilder {
    pages: Vec<Vec<String>>,
}

impl PageBuilder {
    fn new() -> Self {
        Self { pages: vec![Vec::new()] }
    }

    fn line(&mut self, text: &str) {
        if self.pages.last().is_none_or(|page| page.len() >= PAGE_HEIGHT_LINES) {
            self.pages.push(Vec::new());
        }

        if let Some(page) = self.pages.last_mut() {
            page.push(text.to_owned());
        }
    }

    fn blank(&mut self) {
        self.line("");
    }

    fn center(&mut self, text: &str) {
        let padding = PAGE_WIDTH.saturating_sub(text.chars().count()) / 2;
        self.line(&format!("{}{}", " ".repeat(padding), text));
    }

    fn pair(&mut self, label: &str, value: &str) {
        self.line(&format!("  {label:<20} {value}"));
    }

    /// Pad every page to the page height, add the footers, and join the pages
    /// with form feeds.
    fn finish(mut self) -> String {
        let page_count = self.pages.len();

        let rendered: Vec<String> = self
            .pages
            .iter_mut()
            .enumerate()
            .map(|(index, page)| {
                while page.len() < PAGE_HEIGHT_LINES {
                    page.push(String::new());
                }

                let footer = format!("Page {} of {page_count}", index + 1);
                let footer_padding = PAGE_WIDTH.saturating_sub(footer.chars().count()) / 2;
                page.push(format!("{}{footer}", " ".repeat(footer_padding)));

                let tagline_padding =
                    PAGE_WIDTH.saturating_sub(FOOTER_TAGLINE.chars().count()) / 2;
                page.push(format!("{}{FOOTER_TAGLINE}", " ".repeat(tagline_padding)));

                page.join("\n")
            })
            .collect();

        rendered.join("\u{000C}\n")
    }
}

/// Truncate a description to [LABEL_LIMIT] graphemes, ellipsized.
fn truncate_label(label: &str) -> String {
    let graphemes: Vec<&str> = label.graphemes(true).collect();

    if graphemes.len() <= LABEL_LIMIT {
        label.to_owned()
    } else {
        format!("{}...", graphemes[..LABEL_LIMIT - 3].concat())
    }
}

/// Turn a budget name into a file-name-safe slug; empty names become "report".
fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    if slug.is_empty() {
        "report".to_owned()
    } else {
        slug
    }
}

fn long_date(date: Date) -> String {
    format!(
        "{} {}, {}",
        month_name(date.month()),
        date.day(),
        date.year()
    )
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

#[cfg(test)]
mod export_report_endpoint_tests {
    use axum::extract::State;

    use super::{ExportReportState, get_export_report};
    use crate::{
        AppState, JsonStore,
        currency::Currency,
        test_utils::{assert_content_type, assert_status_ok, get_header},
    };

    #[tokio::test]
    async fn download_has_a_slugified_dated_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("budget-data.json"));
        let app_state = AppState::new(store, "UTC").expect("Could not create app state");
        let state = ExportReportState {
            ledger: app_state.ledger,
            local_timezone: app_state.local_timezone,
        };
        state
            .ledger
            .lock()
            .unwrap()
            .create_budget("My Budget".to_owned(), 1000.0, Currency::Usd);

        let response = get_export_report(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/plain; charset=utf-8");

        let disposition = get_header(&response, "content-disposition");
        assert!(disposition.starts_with("attachment; filename=\"budget-my-budget-"));
        assert!(disposition.ends_with(".txt\""));
    }
}

#[cfg(test)]
mod report_tests {
    use time::macros::date;

    use super::{render_report, slugify, truncate_label};
    use crate::{category::Category, currency::Currency, ledger::Ledger};

    fn ledger_with_expenses(count: usize) -> Ledger {
        let mut ledger = Ledger::default();
        let budget = ledger.create_budget("My Budget".to_owned(), 1000.0, Currency::Usd);
        ledger
            .add_income_source(&budget.id, "Salary".to_owned(), 1000.0)
            .unwrap();

        for i in 0..count {
            ledger
                .add_expense(
                    format!("Expense {i}"),
                    10.0,
                    Category::Food,
                    date!(2024 - 03 - 01),
                )
                .unwrap();
        }

        ledger
    }

    #[test]
    fn report_has_title_summary_and_income_blocks() {
        let ledger = ledger_with_expenses(2);

        let report = render_report(
            &ledger.budgets[0],
            ledger.expenses.clone(),
            date!(2024 - 03 - 15),
        );

        assert!(report.contains("Budget Report"));
        assert!(report.contains("My Budget"));
        assert!(report.contains("Generated on March 15, 2024"));
        assert!(report.contains("Total Budget:"));
        assert!(report.contains("Budget Used:"));
        assert!(report.contains("2.0%"));
        assert!(report.contains("Income Breakdown"));
        assert!(report.contains("Salary:"));
    }

    #[test]
    fn report_without_expenses_says_so() {
        let ledger = ledger_with_expenses(0);

        let report = render_report(
            &ledger.budgets[0],
            Vec::new(),
            date!(2024 - 03 - 15),
        );

        assert!(report.contains("No expenses recorded yet."));
        assert!(report.contains("Page 1 of 1"));
    }

    #[test]
    fn long_reports_paginate_with_footers_on_every_page() {
        let ledger = ledger_with_expenses(120);

        let report = render_report(
            &ledger.budgets[0],
            ledger.expenses.clone(),
            date!(2024 - 03 - 15),
        );

        let page_count = report.matches('\u{000C}').count() + 1;
        assert!(page_count >= 3, "want at least 3 pages, got {page_count}");
        assert!(report.contains(&format!("Page 1 of {page_count}")));
        assert!(report.contains(&format!("Page {page_count} of {page_count}")));
    }

    #[test]
    fn long_labels_are_truncated_with_an_ellipsis() {
        let label = "A very long expense description that keeps going";

        let truncated = truncate_label(label);

        assert_eq!(truncated, "A very long expense de...");
        assert_eq!(truncated.chars().count(), 25);
        assert_eq!(truncate_label("Short"), "Short");
    }

    #[test]
    fn slugify_matches_the_file_name_rules() {
        assert_eq!(slugify("My Budget"), "my-budget");
        assert_eq!(slugify("Trip to Bali 2024!"), "trip-to-bali-2024");
        assert_eq!(slugify(""), "report");
        assert_eq!(slugify("   "), "report");
    }
}
