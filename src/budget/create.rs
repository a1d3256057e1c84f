//! Budget creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error, JsonStore,
    currency::{ALL_CURRENCIES, Currency},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        FORM_TEXT_INPUT_STYLE, page,
    },
    ledger::Ledger,
    validate::{parse_positive_amount, require_non_empty},
};

/// The state needed for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
}

impl FromRef<AppState> for CreateBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// The budget creation form submission.
#[derive(Debug, Deserialize)]
pub struct BudgetFormData {
    /// The budget name.
    pub name: String,
    /// The budget amount, as typed.
    pub amount: String,
    /// The budget currency.
    pub currency: Currency,
}

/// Render the budget creation page.
pub async fn get_new_budget_page() -> Response {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-xl font-bold mb-4" { "New Budget" }
            (new_budget_form_view())
        }
    };

    page("New Budget", endpoints::BUDGETS_VIEW, &content).into_response()
}

/// Handle budget creation form submission.
///
/// The new budget becomes the active one.
pub async fn create_budget_endpoint(
    State(state): State<CreateBudgetState>,
    Form(new_budget): Form<BudgetFormData>,
) -> Response {
    let name = match require_non_empty(&new_budget.name, Error::EmptyBudgetName) {
        Ok(name) => name,
        Err(error) => return error.into_alert_response(),
    };
    let amount = match parse_positive_amount(&new_budget.amount) {
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

    ledger.create_budget(name, amount, new_budget.currency);
    state.store.save_best_effort(&ledger);

    (
        HxRedirect(endpoints::BUDGETS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn new_budget_form_view() -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_BUDGET)
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
                    placeholder="Budget Name"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="any"
                    min="0"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="currency" class=(FORM_LABEL_STYLE) { "Currency" }

                select id="currency" name="currency" class=(FORM_SELECT_STYLE)
                {
                    @for currency in ALL_CURRENCIES {
                        option value=(currency.code()) lang=(currency.locale()) {
                            (currency.code()) " (" (currency.name()) ")"
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Budget" }
        }
    }
}

#[cfg(test)]
mod new_budget_page_tests {
    use axum::http::StatusCode;

    use super::get_new_budget_page;
    use crate::{
        endpoints,
        test_utils::{
            assert_form_input, assert_form_select, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    #[tokio::test]
    async fn render_page() {
        let response = get_new_budget_page().await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_BUDGET, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_select(&form, "currency");
        assert_form_submit_button(&form);
    }
}
