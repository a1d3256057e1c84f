//! Expense edit page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::html;

use crate::{
    AppState, Error, JsonStore, endpoints,
    expense::form::{ExpenseFormData, ExpenseFormValues, expense_form_view},
    html::{FORM_CONTAINER_STYLE, page},
    ledger::Ledger,
};

/// The state needed for editing an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// Render the expense edit page, pre-filled with the expense's fields.
pub async fn get_edit_expense_page(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<String>,
) -> Result<Response, Error> {
    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let expense = ledger
        .expenses
        .iter()
        .find(|expense| expense.id == expense_id)
        .ok_or(Error::NotFound)?;

    let amount = expense.amount.to_string();
    let values = ExpenseFormValues {
        label: &expense.label,
        amount: &amount,
        category: expense.category,
        date: expense.date,
    };
    let endpoint = endpoints::format_endpoint(endpoints::PUT_EXPENSE, &expense_id);
    let form = expense_form_view("hx-put", &endpoint, &values, "Save Changes");

    let content = html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-xl font-bold mb-4" { "Edit Expense" }
            (form)
        }
    };

    Ok(page("Edit Expense", endpoints::EXPENSES_VIEW, &content).into_response())
}

/// Handle the expense edit form submission.
///
/// Editing an expense that no longer exists is a no-op; either way the client
/// is sent back to the expenses table.
pub async fn update_expense_endpoint(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<String>,
    Form(updated): Form<ExpenseFormData>,
) -> Response {
    let validated = match updated.validate() {
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

    ledger.update_expense(
        &expense_id,
        validated.label,
        validated.amount,
        validated.category,
        validated.date,
    );
    state.store.save_best_effort(&ledger);

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
