//! The page that displays the active budget's expenses as a filterable table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    analytics::{FilterQuery, filter_expenses, sort_by_date_descending},
    currency::Currency,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, filter_form, link, page,
    },
    ledger::{Expense, Ledger},
    timezone::local_date_today,
};

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesViewState {
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpensesViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the expenses table for the active budget, filtered by the query
/// parameters.
pub async fn get_expenses_page(
    State(state): State<ExpensesViewState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let today = local_date_today(&state.local_timezone)?;

    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let Some(active_budget) = ledger.active_budget() else {
        return Ok(page("Expenses", endpoints::EXPENSES_VIEW, &no_budget_view()).into_response());
    };

    let filter = query.to_filter(Some(active_budget.id.clone()));
    let expenses = sort_by_date_descending(filter_expenses(&ledger.expenses, &filter, today));

    let content = expenses_view(
        &active_budget.name,
        active_budget.currency,
        &expenses,
        &query,
    );

    Ok(page("Expenses", endpoints::EXPENSES_VIEW, &content).into_response())
}

fn no_budget_view() -> Markup {
    html! {
        div class="text-center py-8" {
            h1 class="text-xl font-bold mb-4" { "No budget yet" }
            p class="mb-4" { "Create a budget first, then start logging expenses against it." }
            p { (link(endpoints::NEW_BUDGET_VIEW, "Create a budget")) }
        }
    }
}

fn expenses_view(
    budget_name: &str,
    currency: Currency,
    expenses: &[Expense],
    query: &FilterQuery,
) -> Markup {
    html! {
        div class="w-full max-w-4xl" {
            div class="flex flex-wrap items-baseline justify-between gap-2 mb-4" {
                h1 class="text-xl font-bold" {
                    "Expenses"
                    span class="ml-2 text-sm font-normal text-gray-600 dark:text-gray-400" {
                        (budget_name)
                    }
                }

                div class="flex gap-2" {
                    a href=(endpoints::NEW_EXPENSE_VIEW) class=(BUTTON_SECONDARY_STYLE) {
                        "New Expense"
                    }
                    a href=(endpoints::EXPORT_CSV) class=(BUTTON_SECONDARY_STYLE) {
                        "Export CSV"
                    }
                    a href=(endpoints::EXPORT_REPORT) class=(BUTTON_SECONDARY_STYLE) {
                        "Export Report"
                    }
                    button
                        hx-post=(endpoints::RESET)
                        hx-confirm="Are you sure you want to reset all data? This action cannot be undone."
                        hx-target-error="#alert-container"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Reset"
                    }
                }
            }

            (filter_form(query, endpoints::EXPENSES_VIEW))

            (expense_table(currency, expenses))
        }
    }
}

fn expense_table(currency: Currency, expenses: &[Expense]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full" {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody {
                    @if expenses.is_empty() {
                        tr class=(TABLE_ROW_STYLE) {
                            td colspan="5" class=(TABLE_CELL_STYLE) {
                                "No expenses match the current filters."
                            }
                        }
                    }

                    @for expense in expenses {
                        (expense_row(currency, expense))
                    }
                }
            }
        }
    }
}

fn expense_row(currency: Currency, expense: &Expense) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, &expense.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_EXPENSE, &expense.id);
    let badge_style = format!("background-color: {}", expense.category.color());

    html! {
        tr class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) { (expense.date) }
            td class=(TABLE_CELL_STYLE) {
                span class=(CATEGORY_BADGE_STYLE) style=(badge_style) {
                    (expense.category.display_label())
                }
            }
            td class=(TABLE_CELL_STYLE) { (expense.label) }
            td class=(TABLE_CELL_STYLE) { (currency.format(expense.amount)) }
            td class=(TABLE_CELL_STYLE) {
                a href=(edit_url) class=(format!("{LINK_STYLE} mr-2")) { "Edit" }
                button
                    hx-delete=(delete_url)
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-confirm="Delete this expense?"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

#[cfg(test)]
mod expenses_page_tests {
    use axum::extract::{Query, State};
    use scraper::Selector;
    use time::macros::date;

    use super::{ExpensesViewState, get_expenses_page};
    use crate::{
        AppState, JsonStore,
        analytics::FilterQuery,
        category::Category,
        currency::Currency,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    fn get_test_state(dir: &tempfile::TempDir) -> ExpensesViewState {
        let store = JsonStore::new(dir.path().join("budget-data.json"));
        let state = AppState::new(store, "UTC").expect("Could not create app state");

        ExpensesViewState {
            ledger: state.ledger,
            local_timezone: state.local_timezone,
        }
    }

    #[tokio::test]
    async fn page_without_a_budget_prompts_creation() {
        let dir = tempfile::tempdir().unwrap();
        let state = get_test_state(&dir);

        let response = get_expenses_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No budget yet"));
    }

    #[tokio::test]
    async fn table_lists_expenses_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let state = get_test_state(&dir);
        {
            let mut ledger = state.ledger.lock().unwrap();
            ledger.create_budget("Household".to_owned(), 1000.0, Currency::Usd);
            ledger
                .add_expense(
                    "Older".to_owned(),
                    10.0,
                    Category::Food,
                    date!(2024 - 03 - 01),
                )
                .unwrap();
            ledger
                .add_expense(
                    "Newer".to_owned(),
                    20.0,
                    Category::Food,
                    date!(2024 - 03 - 10),
                )
                .unwrap();
        }

        let response = get_expenses_page(State(state), Query(FilterQuery::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let cells: Vec<String> = html
            .select(&Selector::parse("tbody td").unwrap())
            .map(|cell| cell.text().collect::<String>())
            .collect();
        let newer_position = cells.iter().position(|text| text.contains("Newer")).unwrap();
        let older_position = cells.iter().position(|text| text.contains("Older")).unwrap();
        assert!(newer_position < older_position);
    }

    #[tokio::test]
    async fn category_filter_narrows_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let state = get_test_state(&dir);
        {
            let mut ledger = state.ledger.lock().unwrap();
            ledger.create_budget("Household".to_owned(), 1000.0, Currency::Usd);
            ledger
                .add_expense(
                    "Rent".to_owned(),
                    500.0,
                    Category::Housing,
                    date!(2024 - 03 - 01),
                )
                .unwrap();
            ledger
                .add_expense(
                    "Lunch".to_owned(),
                    12.5,
                    Category::Food,
                    date!(2024 - 03 - 02),
                )
                .unwrap();
        }
        let query = FilterQuery {
            category: Some("food".to_owned()),
            ..Default::default()
        };

        let response = get_expenses_page(State(state), Query(query)).await.unwrap();

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Lunch"));
        assert!(!text.contains("Rent"));
    }
}
