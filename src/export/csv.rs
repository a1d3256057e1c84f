//! The CSV export of the active budget's expenses.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use crate::{
    AppState, Error, endpoints,
    ledger::{Budget, Expense, Ledger},
    timezone::local_date_today,
};

/// The state needed for the CSV export.
#[derive(Debug, Clone)]
pub struct ExportCsvState {
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportCsvState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Download the active budget's expenses as a CSV attachment.
///
/// With no active budget there is nothing to export, so the client is sent to
/// the dashboard instead.
pub async fn get_export_csv(State(state): State<ExportCsvState>) -> Result<Response, Error> {
    let today = local_date_today(&state.local_timezone)?;

    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let Some(budget) = ledger.active_budget() else {
        return Ok(Redirect::to(endpoints::DASHBOARD_VIEW).into_response());
    };

    let expenses: Vec<Expense> = ledger
        .expenses
        .iter()
        .filter(|expense| expense.budget_id.as_deref() == Some(budget.id.as_str()))
        .cloned()
        .collect();

    let body = render_csv(budget, &expenses)?;
    let file_name = format!("budget-export-{today}.csv");

    let mut response = body.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
            .map_err(|error| Error::CsvError(error.to_string()))?,
    );

    Ok(response)
}

/// Render the CSV document: a summary header block followed by one row per
/// expense, sorted ascending by date.
///
/// The summary amounts are plain fixed-decimal numbers so the header lines
/// need no quoting; the data rows carry the currency symbol.
fn render_csv(budget: &Budget, expenses: &[Expense]) -> Result<String, Error> {
    let currency = budget.currency;
    let total_spent: f64 = expenses.iter().map(|expense| expense.amount).sum();
    let remaining = budget.amount - total_spent;

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(["Centsible Export"])?;
    writer.write_record([""])?;
    writer.write_record(["Total Budget", currency.format_plain(budget.amount).as_str()])?;
    writer.write_record(["Total Spent", currency.format_plain(total_spent).as_str()])?;
    writer.write_record(["Remaining", currency.format_plain(remaining).as_str()])?;
    writer.write_record([""])?;
    writer.write_record(["Date", "Category", "Description", "Amount"])?;

    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    for expense in sorted {
        let date = expense.date.to_string();
        let amount = currency.format(expense.amount);

        writer.write_record([
            date.as_str(),
            expense.category.label(),
            expense.label.as_str(),
            amount.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}
