//! Expense creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::html;

use crate::{
    AppState, Error, JsonStore,
    category::Category,
    endpoints,
    expense::form::{ExpenseFormData, ExpenseFormValues, expense_form_view},
    html::{FORM_CONTAINER_STYLE, page},
    ledger::Ledger,
    timezone::local_date_today,
};

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the expense creation page.
///
/// The date field defaults to today in the configured timezone.
pub async fn get_new_expense_page(
    State(state): State<CreateExpenseState>,
) -> Result<Response, Error> {
    let today = local_date_today(&state.local_timezone)?;

    let values = ExpenseFormValues {
        label: "",
        amount: "",
        category: Category::Food,
        date: today,
    };
    let form = expense_form_view(
        "hx-post",
        endpoints::POST_EXPENSE,
        &values,
        "Add Expense",
    );

    let content = html! {
        div class=(FORM_CONTAINER_STYLE) {
            h1 class="text-xl font-bold mb-4" { "New Expense" }
            (form)
        }
    };

    Ok(page("New Expense", endpoints::EXPENSES_VIEW, &content).into_response())
}

/// Handle expense creation form submission.
///
/// Fails with an alert, mutating nothing, when validation fails or no budget
/// is active.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(new_expense): Form<ExpenseFormData>,
) -> Response {
    let validated = match new_expense.validate() {
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

    match ledger.add_expense(
        validated.label,
        validated.amount,
        validated.category,
        validated.date,
    ) {
        Ok(_) => {
            state.store.save_best_effort(&ledger);

            (
                HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod new_expense_page_tests {
    use axum::{extract::State, http::StatusCode};

    use crate::{
        AppState, JsonStore, endpoints,
        expense::create::{CreateExpenseState, get_new_expense_page},
        test_utils::{
            assert_form_input, assert_form_select, assert_form_submit_button, assert_hx_endpoint,
            assert_valid_html, must_get_form, parse_html_document,
        },
    };

    fn get_test_state(dir: &tempfile::TempDir) -> CreateExpenseState {
        let store = JsonStore::new(dir.path().join("budget-data.json"));
        let state = AppState::new(store, "UTC").expect("Could not create app state");

        CreateExpenseState {
            ledger: state.ledger,
            store: state.store,
            local_timezone: state.local_timezone,
        }
    }

    #[tokio::test]
    async fn render_page() {
        let dir = tempfile::tempdir().unwrap();
        let response = get_new_expense_page(State(get_test_state(&dir)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_EXPENSE, "hx-post");
        assert_form_input(&form, "label", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_select(&form, "category");
        assert_form_submit_button(&form);
    }
}
