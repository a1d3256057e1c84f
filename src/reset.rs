//! The reset-all endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, Error, JsonStore, endpoints, ledger::Ledger};

/// The state needed for resetting all data.
#[derive(Debug, Clone)]
pub struct ResetState {
    pub ledger: Arc<Mutex<Ledger>>,
    pub store: Arc<JsonStore>,
}

impl FromRef<AppState> for ResetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            store: state.store.clone(),
        }
    }
}

/// Clear all budgets, expenses and the active-budget pointer.
///
/// Irreversible. The button that posts here carries an `hx-confirm` prompt;
/// this endpoint assumes the user already confirmed.
pub async fn reset_endpoint(State(state): State<ResetState>) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    ledger.reset();
    state.store.save_best_effort(&ledger);

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
