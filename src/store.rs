//! The persistence adapter: one JSON document holding the whole ledger.
//!
//! The document shape is `{ budgets, expenses, activeBudgetId }`. Documents
//! written by the single-budget era of the app (top-level `budgetName`,
//! `budget`, `currency`, `expenses`) are still read, with every field treated
//! as independently optional.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Error,
    currency::Currency,
    ledger::{Budget, Expense, Ledger},
};

/// Reads and writes the ledger as a single JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet; a missing file loads as an empty
    /// ledger and is created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger from disk.
    ///
    /// # Errors
    /// Returns [Error::StoreError] when the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Ledger, Error> {
        if !self.path.exists() {
            return Ok(Ledger::default());
        }

        let text = fs::read_to_string(&self.path)?;

        if text.trim().is_empty() {
            return Ok(Ledger::default());
        }

        let document: StoredDocument = serde_json::from_str(&text)?;

        Ok(document.into_ledger())
    }

    /// Write the ledger to disk, replacing the previous document.
    ///
    /// # Errors
    /// Returns [Error::StoreError] when the file cannot be written.
    pub fn save(&self, ledger: &Ledger) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(ledger)?;
        fs::write(&self.path, text)?;

        Ok(())
    }

    /// Save the ledger, logging instead of failing when the write goes wrong.
    ///
    /// Persistence after a successful mutation is best-effort: the mutation
    /// has already happened in memory, so the request still succeeds.
    pub fn save_best_effort(&self, ledger: &Ledger) {
        if let Err(error) = self.save(ledger) {
            tracing::error!("could not write the data file: {error}");
        }
    }
}

/// The on-disk document, covering both the current multi-budget shape and the
/// legacy single-budget shape.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredDocument {
    budgets: Option<Vec<Budget>>,
    expenses: Vec<Expense>,
    active_budget_id: Option<String>,

    // Legacy single-budget fields.
    budget_name: Option<String>,
    budget: Option<f64>,
    currency: Option<String>,
}

impl StoredDocument {
    fn into_ledger(self) -> Ledger {
        if let Some(budgets) = self.budgets {
            return Ledger {
                budgets,
                expenses: self.expenses,
                active_budget_id: self.active_budget_id,
            };
        }

        let has_legacy_data = self.budget_name.is_some()
            || self.budget.is_some()
            || self.currency.is_some()
            || !self.expenses.is_empty();

        if !has_legacy_data {
            return Ledger::default();
        }

        // Synthesize the single budget the legacy document described, with
        // each missing field defaulted independently.
        let budget = Budget {
            id: format!("budget-{}", Uuid::new_v4()),
            name: self.budget_name.unwrap_or_default(),
            amount: self.budget.unwrap_or(0.0),
            currency: Currency::from_code(&self.currency.unwrap_or_default()),
            created_at: OffsetDateTime::now_utc(),
            income_sources: Vec::new(),
        };

        Ledger {
            active_budget_id: Some(budget.id.clone()),
            budgets: vec![budget],
            expenses: self.expenses,
        }
    }
}
