//! The page listing all budgets.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, link, page,
    },
    ledger::{Budget, Ledger},
};

/// The state needed for the budgets page.
#[derive(Debug, Clone)]
pub struct BudgetsViewState {
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for BudgetsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Render the list of budgets with switch, edit and delete controls.
pub async fn get_budgets_page(State(state): State<BudgetsViewState>) -> Result<Response, Error> {
    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let content = budgets_view(&ledger.budgets, ledger.active_budget_id.as_deref());

    Ok(page("Budgets", endpoints::BUDGETS_VIEW, &content).into_response())
}

fn budgets_view(budgets: &[Budget], active_budget_id: Option<&str>) -> Markup {
    html! {
        div class="w-full max-w-4xl" {
            div class="flex items-baseline justify-between mb-4" {
                h1 class="text-xl font-bold" { "Budgets" }

                a href=(endpoints::NEW_BUDGET_VIEW) class=(BUTTON_SECONDARY_STYLE) {
                    "New Budget"
                }
            }

            @if budgets.is_empty() {
                div class="text-center py-8" {
                    p class="mb-4" { "No budgets yet." }
                    p { (link(endpoints::NEW_BUDGET_VIEW, "Create your first budget")) }
                }
            } @else {
                div class="relative overflow-x-auto shadow-md sm:rounded-lg w-full" {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                        thead class=(TABLE_HEADER_STYLE) {
                            tr {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Income Sources" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody {
                            @for budget in budgets {
                                (budget_row(budget, active_budget_id == Some(budget.id.as_str())))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn budget_row(budget: &Budget, is_active: bool) -> Markup {
    let edit_url = endpoints::format_endpoint(endpoints::EDIT_BUDGET_VIEW, &budget.id);
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_BUDGET, &budget.id);
    let switch_url = endpoints::format_endpoint(endpoints::SWITCH_BUDGET, &budget.id);

    html! {
        tr class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) {
                (budget.name)
                @if is_active {
                    span class="ml-2 text-xs font-semibold text-blue-700 dark:text-blue-300" {
                        "(active)"
                    }
                }
            }
            td class=(TABLE_CELL_STYLE) { (budget.currency.format(budget.amount)) }
            td class=(TABLE_CELL_STYLE) { (budget.income_sources.len()) }
            td class=(TABLE_CELL_STYLE) {
                @if !is_active {
                    form method="post" action=(switch_url) class="inline mr-2" {
                        button
                            type="submit"
                            class=(format!("{LINK_STYLE} bg-transparent border-none cursor-pointer"))
                        {
                            "Switch to"
                        }
                    }
                }
                a href=(edit_url) class=(format!("{LINK_STYLE} mr-2")) { "Edit" }
                button
                    hx-delete=(delete_url)
                    hx-confirm="Are you sure you want to delete this budget and all its expenses?"
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
mod budgets_page_tests {
    use axum::extract::State;

    use super::{BudgetsViewState, get_budgets_page};
    use crate::{
        AppState, JsonStore,
        currency::Currency,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    fn get_test_state(dir: &tempfile::TempDir) -> BudgetsViewState {
        let store = JsonStore::new(dir.path().join("budget-data.json"));
        let state = AppState::new(store, "UTC").expect("Could not create app state");

        BudgetsViewState { ledger: state.ledger }
    }

    #[tokio::test]
    async fn empty_state_prompts_creation() {
        let dir = tempfile::tempdir().unwrap();
        let state = get_test_state(&dir);

        let response = get_budgets_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No budgets yet."));
    }

    #[tokio::test]
    async fn active_budget_is_marked() {
        let dir = tempfile::tempdir().unwrap();
        let state = get_test_state(&dir);
        {
            let mut ledger = state.ledger.lock().unwrap();
            ledger.create_budget("Household".to_owned(), 1000.0, Currency::Usd);
            ledger.create_budget("Travel".to_owned(), 500.0, Currency::Usd);
        }

        let response = get_budgets_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Household"));
        assert!(text.contains("Travel"));
        // Only the most recently created budget is active.
        assert_eq!(text.matches("(active)").count(), 1);
    }
}
