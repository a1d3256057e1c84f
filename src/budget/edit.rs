//! Budget edit page and endpoint.
//!
//! The edit page also hosts the income source list for the budget, since
//! income sources are what derive the budget amount.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, JsonStore, endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CONTAINER_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, page,
    },
    ledger::{Budget, Ledger},
    validate::{parse_positive_amount, require_non_empty},
};

/// The state needed for editing a budget.
#[derive(Debug, Clone)]
pub struct EditBudgetState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
}

impl FromRef<AppState> for EditBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// The budget edit form submission.
///
/// The currency is fixed at creation; only the name and amount can change.
#[derive(Debug, Deserialize)]
pub struct EditBudgetFormData {
    /// The budget name.
    pub name: String,
    /// The budget amount, as typed.
    pub amount: String,
}

/// Render the budget edit page with the income source list.
pub async fn get_edit_budget_page(
    State(state): State<EditBudgetState>,
    Path(budget_id): Path<String>,
) -> Result<Response, Error> {
    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let budget = ledger.budget(&budget_id).ok_or(Error::NotFound)?;

    let content = edit_budget_view(budget);

    Ok(page("Edit Budget", endpoints::BUDGETS_VIEW, &content).into_response())
}

/// Handle the budget edit form submission.
///
/// Replaces the name and amount in place; income sources are untouched. Note
/// that the next income source mutation re-derives the amount from the
/// sources, so a manual amount only sticks while the source list is empty.
pub async fn update_budget_endpoint(
    State(state): State<EditBudgetState>,
    Path(budget_id): Path<String>,
    Form(updated): Form<EditBudgetFormData>,
) -> Response {
    let name = match require_non_empty(&updated.name, Error::EmptyBudgetName) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };
    let amount = match parse_positive_amount(&updated.amount) {
        Ok(amount) => amount,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    match ledger.update_budget(&budget_id, name, amount) {
        Ok(()) => {
            state.store.save_best_effort(&ledger);

            (
                HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

fn edit_budget_view(budget: &Budget) -> Markup {
    let endpoint = endpoints::format_endpoint(endpoints::PUT_BUDGET, &budget.id);
    let new_income_url = endpoints::format_endpoint(endpoints::NEW_INCOME_VIEW, &budget.id);
    let amount = budget.amount.to_string();

    html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-xl font-bold mb-4" { "Edit Budget" }

            form
                hx-put=(endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Budget Name" }

                    input
                        id="name"
                        type="text"
                        name="name"
                        value=(budget.name)
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount (" (budget.currency.code()) ")" }

                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="any"
                        min="0"
                        value=(amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);

                    @if !budget.income_sources.is_empty() {
                        p class="text-xs text-gray-600 dark:text-gray-400 mt-1" {
                            "This budget's amount is derived from its income sources; \
                            the next income change will overwrite a manual amount."
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }
            }

            section class="w-full mt-8" {
                div class="flex items-baseline justify-between mb-2" {
                    h2 class="text-lg font-semibold" { "Income Sources" }

                    a href=(new_income_url) class=(BUTTON_SECONDARY_STYLE) { "Add Income Source" }
                }

                @if budget.income_sources.is_empty() {
                    p class="text-sm text-gray-600 dark:text-gray-400" {
                        "No income sources. The budget amount is the manually entered value."
                    }
                } @else {
                    ul class="divide-y divide-gray-200 dark:divide-gray-700" {
                        @for source in &budget.income_sources {
                            (income_source_row(budget, &source.id, &source.name, source.amount))
                        }
                    }
                }
            }
        }
    }
}

fn income_source_row(budget: &Budget, source_id: &str, name: &str, amount: f64) -> Markup {
    let edit_url = endpoints::format_endpoint(
        &endpoints::format_endpoint(endpoints::EDIT_INCOME_VIEW, &budget.id),
        source_id,
    );
    let delete_url = endpoints::format_endpoint(
        &endpoints::format_endpoint(endpoints::DELETE_INCOME, &budget.id),
        source_id,
    );

    html! {
        li class="flex items-center justify-between py-2" {
            span { (name) }
            span class="font-semibold" { (budget.currency.format(amount)) }
            span {
                a href=(edit_url) class=(format!("{LINK_STYLE} mr-2")) { "Edit" }
                button
                    hx-delete=(delete_url)
                    hx-confirm="Delete this income source?"
                    hx-target-error="#alert-container"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
