//! Centsible is a web app for tracking expenses against personal budgets.
//!
//! Budgets can be split across several income sources and carry their own
//! currency; expenses are logged against a fixed category set and summarized
//! into statistics, category breakdowns, and CSV/report exports.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod analytics;
mod app_state;
mod budget;
mod category;
mod currency;
mod dashboard;
mod endpoints;
mod expense;
mod export;
mod html;
mod internal_server_error;
mod ledger;
mod logging;
mod navigation;
mod not_found;
mod reset;
mod routing;
mod store;
#[cfg(test)]
mod test_utils;
mod timezone;
mod validate;

pub use app_state::AppState;
pub use routing::build_router;
pub use store::JsonStore;

use crate::{
    alert::AlertTemplate,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted an amount that is not a positive number.
    ///
    /// Carries the raw text the user typed so the alert can echo it back.
    #[error("\"{0}\" is not a positive amount")]
    InvalidAmount(String),

    /// An empty string was used as an expense description.
    #[error("Expense description cannot be empty")]
    EmptyExpenseLabel,

    /// An empty string was used as a budget name.
    #[error("Budget name cannot be empty")]
    EmptyBudgetName,

    /// An empty string was used as an income source name.
    #[error("Income source name cannot be empty")]
    EmptyIncomeSourceName,

    /// Tried to add an expense while no budget is active.
    ///
    /// Expenses always belong to a budget, so the user must create one first.
    #[error("no budget is active, create a budget first")]
    NoActiveBudget,

    /// Tried to delete the only remaining budget.
    #[error("cannot delete the last remaining budget")]
    CannotDeleteLastBudget,

    /// The budget ID did not match any stored budget.
    #[error("the budget could not be found")]
    BudgetNotFound,

    /// The income source ID did not match any income source on the budget.
    #[error("the income source could not be found")]
    IncomeSourceNotFound,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the ledger lock.
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The data file could not be read, written, or parsed.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not access the data file: {0}")]
    StoreError(String),

    /// The CSV export could not be rendered.
    #[error("could not render the CSV export: {0}")]
    CsvError(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::StoreError(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::StoreError(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                })
            }
            Error::LedgerLockError => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidAmount(text) => AlertTemplate::error(
                "Invalid amount",
                &format!("\"{text}\" is not a positive amount. Enter a number greater than zero."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::EmptyExpenseLabel => AlertTemplate::error(
                "Missing description",
                "Describe what the expense was for before saving it.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::EmptyBudgetName => AlertTemplate::error(
                "Missing budget name",
                "Give the budget a name before saving it.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::EmptyIncomeSourceName => AlertTemplate::error(
                "Missing income source name",
                "Give the income source a name before saving it.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::NoActiveBudget => AlertTemplate::error(
                "No active budget",
                "Create a budget first before adding expenses.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::CannotDeleteLastBudget => AlertTemplate::error(
                "Cannot delete budget",
                "This is the only budget. Create a new one before deleting it.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::BudgetNotFound => AlertTemplate::error(
                "Could not find budget",
                "The budget could not be found. \
                Try refreshing the page to see if it has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::IncomeSourceNotFound => AlertTemplate::error(
                "Could not find income source",
                "The income source could not be found. \
                Try refreshing the page to see if it has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                AlertTemplate::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
