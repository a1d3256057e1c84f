//! Expense deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{AppState, Error, JsonStore, alert::AlertTemplate, ledger::Ledger};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// A route handler for deleting an expense.
///
/// Deleting an expense that no longer exists is a no-op. The response body is
/// only the out-of-band alert, so the swap clears the table row that issued
/// the request; the status code has to be 200 OK or HTMX will not delete the
/// row.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<String>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    ledger.delete_expense(&expense_id);
    state.store.save_best_effort(&ledger);

    AlertTemplate::success("Expense deleted", "").into_response_with_status(StatusCode::OK)
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use axum::{
        extract::{Path, State},
        response::IntoResponse,
    };
    use time::macros::date;

    use scraper::Selector;

    use super::{DeleteExpenseState, delete_expense_endpoint};
    use crate::{
        AppState, JsonStore,
        category::Category,
        currency::Currency,
        test_utils::{assert_status_ok, parse_html_fragment},
    };

    fn get_test_state(dir: &tempfile::TempDir) -> DeleteExpenseState {
        let store = JsonStore::new(dir.path().join("budget-data.json"));
        let state = AppState::new(store, "UTC").expect("Could not create app state");

        DeleteExpenseState {
            ledger: state.ledger,
            store: state.store,
        }
    }

    #[tokio::test]
    async fn deletes_the_expense() {
        let dir = tempfile::tempdir().unwrap();
        let state = get_test_state(&dir);
        let expense_id = {
            let mut ledger = state.ledger.lock().unwrap();
            ledger.create_budget("Household".to_owned(), 1000.0, Currency::Usd);
            ledger
                .add_expense(
                    "Lunch".to_owned(),
                    12.5,
                    Category::Food,
                    date!(2024 - 03 - 01),
                )
                .unwrap()
                .id
        };

        let response = delete_expense_endpoint(State(state.clone()), Path(expense_id))
            .await
            .into_response();

        assert_status_ok(&response);
        assert!(state.ledger.lock().unwrap().expenses.is_empty());
        assert!(state.store.load().unwrap().expenses.is_empty());

        // The body only carries the out-of-band alert, so the row swap clears
        // the deleted row.
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("#alert-container").unwrap())
            .next()
            .expect("no alert in delete response");
        assert!(alert.value().attr("hx-swap-oob").is_some());
    }

    #[tokio::test]
    async fn deleting_an_unknown_expense_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let state = get_test_state(&dir);
        {
            let mut ledger = state.ledger.lock().unwrap();
            ledger.create_budget("Household".to_owned(), 1000.0, Currency::Usd);
            ledger
                .add_expense(
                    "Lunch".to_owned(),
                    12.5,
                    Category::Food,
                    date!(2024 - 03 - 01),
                )
                .unwrap();
        }

        let response = delete_expense_endpoint(State(state.clone()), Path("missing".to_owned()))
            .await
            .into_response();

        assert_status_ok(&response);
        assert_eq!(state.ledger.lock().unwrap().expenses.len(), 1);
    }
}
