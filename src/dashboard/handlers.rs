//! The dashboard route handler.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    analytics::{
        ExpenseFilter, FilterQuery, category_breakdown, compute_summary, filter_expenses,
        income_breakdown,
    },
    endpoints,
    html::{breakdown_bar_styles, page, page_with_head},
    ledger::Ledger,
    timezone::local_date_today,
};

use super::view::{BudgetOverview, dashboard_view, no_budget_view};

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the dashboard for the active budget.
///
/// The overview figures always cover the whole budget; the statistics and
/// category breakdown reflect the category/date-range filter from the query
/// string.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let today = local_date_today(&state.local_timezone)?;

    let ledger = state.ledger.lock().map_err(|error| {
        tracing::error!("could not acquire ledger lock: {error}");
        Error::LedgerLockError
    })?;

    let Some(budget) = ledger.active_budget() else {
        return Ok(page("Dashboard", endpoints::DASHBOARD_VIEW, &no_budget_view()).into_response());
    };

    // Overview totals cover every expense of the budget, unfiltered.
    let budget_filter = ExpenseFilter {
        budget_id: Some(budget.id.clone()),
        ..Default::default()
    };
    let budget_expenses = filter_expenses(&ledger.expenses, &budget_filter, today);
    let total_spent: f64 = budget_expenses.iter().map(|expense| expense.amount).sum();
    let percentage_used = if budget.amount > 0.0 {
        (total_spent / budget.amount) * 100.0
    } else {
        0.0
    };

    let overview = BudgetOverview {
        name: budget.name.clone(),
        currency: budget.currency,
        amount: budget.amount,
        total_spent,
        remaining: budget.amount - total_spent,
        percentage_used,
    };

    let filtered = filter_expenses(&ledger.expenses, &query.to_filter(Some(budget.id.clone())), today);
    let summary = compute_summary(&filtered, today);
    let categories = category_breakdown(&filtered);
    let income = income_breakdown(&budget.income_sources);

    let content = dashboard_view(&overview, &summary, &categories, &income, &query);

    Ok(page_with_head(
        "Dashboard",
        endpoints::DASHBOARD_VIEW,
        &[breakdown_bar_styles()],
        &content,
    )
    .into_response())
}
