//! The endpoint that makes a budget the active one.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{AppState, Error, JsonStore, endpoints, ledger::Ledger};

/// The state needed for switching the active budget.
#[derive(Debug, Clone)]
pub struct SwitchBudgetState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
}

impl FromRef<AppState> for SwitchBudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// Make `budget_id` the active budget and send the client to the unfiltered
/// expenses view.
///
/// Switching with an unknown ID silently leaves the active budget unchanged.
/// The redirect target carries no query string, which is what clears any
/// ad-hoc date-range filter: a stale custom range from the previous budget
/// would otherwise hide all of the new budget's data.
pub async fn switch_budget_endpoint(
    State(state): State<SwitchBudgetState>,
    Path(budget_id): Path<String>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_response();
        }
    };

    ledger.switch_active(&budget_id);
    state.store.save_best_effort(&ledger);

    Redirect::to(endpoints::EXPENSES_VIEW).into_response()
}
