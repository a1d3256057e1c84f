//! Income source pages and endpoints.
//!
//! Every income mutation re-derives the owning budget's amount as the sum of
//! its income sources.

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
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, page},
    ledger::Ledger,
    validate::{parse_positive_amount, require_non_empty},
};

/// The state needed for income source management.
#[derive(Debug, Clone)]
pub struct IncomeState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
}

impl FromRef<AppState> for IncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// The income source form submission.
#[derive(Debug, Deserialize)]
pub struct IncomeFormData {
    /// The income source name, e.g. "Salary".
    pub name: String,
    /// The amount contributed, as typed.
    pub amount: String,
}

/// Render the page for adding an income source to a budget.
pub async fn get_new_income_page(
    State(state): State<IncomeState>,
    Path(budget_id): Path<String>,
) -> Result<Response, Error> {
    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let budget = ledger.budget(&budget_id).ok_or(Error::NotFound)?;

    let endpoint = endpoints::format_endpoint(endpoints::POST_INCOME, &budget.id);
    let content = income_form_page(
        &format!("Add Income Source for {}", budget.name),
        "hx-post",
        &endpoint,
        "",
        "",
        "Add Income Source",
    );

    Ok(page("Add Income Source", endpoints::BUDGETS_VIEW, &content).into_response())
}

/// Render the page for editing an income source.
pub async fn get_edit_income_page(
    State(state): State<IncomeState>,
    Path((budget_id, source_id)): Path<(String, String)>,
) -> Result<Response, Error> {
    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let budget = ledger.budget(&budget_id).ok_or(Error::NotFound)?;
    let source = budget
        .income_sources
        .iter()
        .find(|source| source.id == source_id)
        .ok_or(Error::NotFound)?;

    let endpoint = endpoints::format_endpoint(
        &endpoints::format_endpoint(endpoints::PUT_INCOME, &budget_id),
        &source_id,
    );
    let amount = source.amount.to_string();
    let content = income_form_page(
        &format!("Edit Income Source for {}", budget.name),
        "hx-put",
        &endpoint,
        &source.name,
        &amount,
        "Save Changes",
    );

    Ok(page("Edit Income Source", endpoints::BUDGETS_VIEW, &content).into_response())
}

/// Handle the add-income-source form submission.
pub async fn create_income_endpoint(
    State(state): State<IncomeState>,
    Path(budget_id): Path<String>,
    Form(new_income): Form<IncomeFormData>,
) -> Response {
    let (name, amount) = match validate_income_form(new_income) {
        Ok(validated) => validated,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    match ledger.add_income_source(&budget_id, name, amount) {
        Ok(_) => {
            state.store.save_best_effort(&ledger);
            redirect_to_budget(&budget_id)
        }
        Err(error) => error.into_alert_response(),
    }
}

/// Handle the edit-income-source form submission.
pub async fn update_income_endpoint(
    State(state): State<IncomeState>,
    Path((budget_id, source_id)): Path<(String, String)>,
    Form(updated): Form<IncomeFormData>,
) -> Response {
    let (name, amount) = match validate_income_form(updated) {
        Ok(validated) => validated,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    match ledger.update_income_source(&budget_id, &source_id, name, amount) {
        Ok(()) => {
            state.store.save_best_effort(&ledger);
            redirect_to_budget(&budget_id)
        }
        Err(error) => error.into_alert_response(),
    }
}

/// Handle income source deletion.
pub async fn delete_income_endpoint(
    State(state): State<IncomeState>,
    Path((budget_id, source_id)): Path<(String, String)>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    match ledger.delete_income_source(&budget_id, &source_id) {
        Ok(()) => {
            state.store.save_best_effort(&ledger);
            redirect_to_budget(&budget_id)
        }
        Err(error) => error.into_alert_response(),
    }
}

fn validate_income_form(form: IncomeFormData) -> Result<(String, f64), Error> {
    let name = require_non_empty(&form.name, Error::EmptyIncomeSourceName)?;
    let amount = parse_positive_amount(&form.amount)?;

    Ok((name, amount))
}

fn redirect_to_budget(budget_id: &str) -> Response {
    (
        HxRedirect(endpoints::format_endpoint(
            endpoints::EDIT_BUDGET_VIEW,
            budget_id,
        )),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn income_form_page(
    heading: &str,
    hx_attribute: &str,
    endpoint: &str,
    name: &str,
    amount: &str,
    submit_text: &str,
) -> Markup {
    html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-xl font-bold mb-4" { (heading) }

            form
                hx-post=[(hx_attribute == "hx-post").then_some(endpoint)]
                hx-put=[(hx_attribute == "hx-put").then_some(endpoint)]
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                div
                {
                    label for="name" class=(FORM_LABEL_STYLE) { "Source Name" }

                    input
                        id="name"
                        type="text"
                        name="name"
                        placeholder="e.g. Salary"
                        value=(name)
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
                        value=(amount)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }
            }
        }
    }
}
