//! The core data models and the single source-of-truth ledger.
//!
//! The ledger owns every budget, income source and expense. The active budget
//! is always resolved on demand from `(budgets, active_budget_id)` rather than
//! mirrored into separate state, and all derived figures (income-derived
//! budget amounts, statistics) are recomputed from this one structure.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{Error, category::Category, currency::Currency};

/// A single dated, categorized, monetary outflow record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The unique ID of the expense.
    pub id: String,
    /// The ID of the budget the expense was logged against.
    ///
    /// `None` for records written before budgets existed; such orphans are
    /// tolerated and simply never match a budget filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<String>,
    /// A text description of what the expense was for.
    pub label: String,
    /// The amount of money spent.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// When the expense happened.
    pub date: Date,
}

/// A named contributor to a budget's total amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSource {
    /// The unique ID of the income source.
    pub id: String,
    /// The ID of the budget that owns this income source.
    pub budget_id: String,
    /// The name of the income source, e.g. "Salary".
    pub name: String,
    /// The amount this source contributes.
    pub amount: f64,
}

/// A named container with a target monetary amount, against which expenses
/// are tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// The unique ID of the budget.
    pub id: String,
    /// The display name of the budget.
    pub name: String,
    /// The budget total.
    ///
    /// Derived as the sum of [Budget::income_sources] whenever any exist,
    /// otherwise the manually entered value.
    pub amount: f64,
    /// The currency amounts in this budget are displayed in.
    pub currency: Currency,
    /// When the budget was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The income sources feeding this budget, in insertion order.
    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,
}

impl Budget {
    /// Replace the budget amount with the sum of its income sources.
    ///
    /// Called after every income source mutation. An empty list sums to zero;
    /// the budget does not revert to a manual amount on its own.
    fn derive_amount_from_income(&mut self) {
        self.amount = self.income_sources.iter().map(|source| source.amount).sum();
    }
}

/// Every budget, income source and expense, plus the active-budget pointer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ledger {
    /// All budgets, in creation order.
    pub budgets: Vec<Budget>,
    /// All expenses across all budgets, in creation order.
    pub expenses: Vec<Expense>,
    /// The ID of the budget expenses are currently entered against, or `None`
    /// when no budgets exist.
    pub active_budget_id: Option<String>,
}

impl Ledger {
    /// The budget currently selected for expense entry and display.
    pub fn active_budget(&self) -> Option<&Budget> {
        let active_id = self.active_budget_id.as_deref()?;
        self.budgets.iter().find(|budget| budget.id == active_id)
    }

    /// Look up a budget by its ID.
    pub fn budget(&self, budget_id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == budget_id)
    }

    fn budget_mut(&mut self, budget_id: &str) -> Result<&mut Budget, Error> {
        self.budgets
            .iter_mut()
            .find(|budget| budget.id == budget_id)
            .ok_or(Error::BudgetNotFound)
    }

    /// Create a budget and make it the active one.
    ///
    /// The caller validates the name and amount before calling this; the
    /// ledger does not re-validate.
    pub fn create_budget(&mut self, name: String, amount: f64, currency: Currency) -> Budget {
        let budget = Budget {
            id: format!("budget-{}", Uuid::new_v4()),
            name,
            amount,
            currency,
            created_at: OffsetDateTime::now_utc(),
            income_sources: Vec::new(),
        };

        self.active_budget_id = Some(budget.id.clone());
        self.budgets.push(budget.clone());

        budget
    }

    /// Make `budget_id` the active budget.
    ///
    /// Silently does nothing when the ID does not match any budget.
    pub fn switch_active(&mut self, budget_id: &str) {
        if self.budget(budget_id).is_some() {
            self.active_budget_id = Some(budget_id.to_owned());
        }
    }

    /// Replace a budget's name and amount in place.
    ///
    /// Income sources are left untouched.
    ///
    /// # Errors
    /// Returns [Error::BudgetNotFound] when the ID does not match any budget.
    pub fn update_budget(&mut self, budget_id: &str, name: String, amount: f64) -> Result<(), Error> {
        let budget = self.budget_mut(budget_id)?;
        budget.name = name;
        budget.amount = amount;

        Ok(())
    }

    /// Delete a budget, cascading deletion of its expenses and income sources.
    ///
    /// When the deleted budget was active, the first remaining budget becomes
    /// active.
    ///
    /// # Errors
    /// Returns [Error::BudgetNotFound] when the ID does not match any budget,
    /// or [Error::CannotDeleteLastBudget] when it is the only budget.
    pub fn delete_budget(&mut self, budget_id: &str) -> Result<(), Error> {
        if self.budget(budget_id).is_none() {
            return Err(Error::BudgetNotFound);
        }

        if self.budgets.len() == 1 {
            return Err(Error::CannotDeleteLastBudget);
        }

        self.budgets.retain(|budget| budget.id != budget_id);
        self.expenses
            .retain(|expense| expense.budget_id.as_deref() != Some(budget_id));

        if self.active_budget_id.as_deref() == Some(budget_id) {
            self.active_budget_id = self.budgets.first().map(|budget| budget.id.clone());
        }

        Ok(())
    }

    /// Add an income source to a budget and re-derive the budget amount.
    ///
    /// # Errors
    /// Returns [Error::BudgetNotFound] when the ID does not match any budget.
    pub fn add_income_source(
        &mut self,
        budget_id: &str,
        name: String,
        amount: f64,
    ) -> Result<IncomeSource, Error> {
        let budget = self.budget_mut(budget_id)?;

        let source = IncomeSource {
            id: format!("income-{}", Uuid::new_v4()),
            budget_id: budget_id.to_owned(),
            name,
            amount,
        };
        budget.income_sources.push(source.clone());
        budget.derive_amount_from_income();

        Ok(source)
    }

    /// Replace an income source's name and amount and re-derive the budget amount.
    ///
    /// # Errors
    /// Returns [Error::BudgetNotFound] or [Error::IncomeSourceNotFound] when
    /// either ID does not match.
    pub fn update_income_source(
        &mut self,
        budget_id: &str,
        source_id: &str,
        name: String,
        amount: f64,
    ) -> Result<(), Error> {
        let budget = self.budget_mut(budget_id)?;

        let source = budget
            .income_sources
            .iter_mut()
            .find(|source| source.id == source_id)
            .ok_or(Error::IncomeSourceNotFound)?;
        source.name = name;
        source.amount = amount;

        budget.derive_amount_from_income();

        Ok(())
    }

    /// Delete an income source and re-derive the budget amount.
    ///
    /// Deleting the last source leaves the amount at the sum of the now-empty
    /// list; the budget does not revert to a manual amount.
    ///
    /// # Errors
    /// Returns [Error::BudgetNotFound] or [Error::IncomeSourceNotFound] when
    /// either ID does not match.
    pub fn delete_income_source(&mut self, budget_id: &str, source_id: &str) -> Result<(), Error> {
        let budget = self.budget_mut(budget_id)?;

        if !budget.income_sources.iter().any(|source| source.id == source_id) {
            return Err(Error::IncomeSourceNotFound);
        }

        budget.income_sources.retain(|source| source.id != source_id);
        budget.derive_amount_from_income();

        Ok(())
    }

    /// Append an expense bound to the active budget.
    ///
    /// # Errors
    /// Returns [Error::NoActiveBudget] when no budget is active; the ledger is
    /// left unchanged.
    pub fn add_expense(
        &mut self,
        label: String,
        amount: f64,
        category: Category,
        date: Date,
    ) -> Result<Expense, Error> {
        let active_id = self
            .active_budget()
            .map(|budget| budget.id.clone())
            .ok_or(Error::NoActiveBudget)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            budget_id: Some(active_id),
            label,
            amount,
            category,
            date,
        };
        self.expenses.push(expense.clone());

        Ok(expense)
    }

    /// Replace an expense's fields in place, keeping its ID and budget.
    ///
    /// Does nothing when the ID does not match any expense.
    pub fn update_expense(
        &mut self,
        expense_id: &str,
        label: String,
        amount: f64,
        category: Category,
        date: Date,
    ) {
        if let Some(expense) = self
            .expenses
            .iter_mut()
            .find(|expense| expense.id == expense_id)
        {
            expense.label = label;
            expense.amount = amount;
            expense.category = category;
            expense.date = date;
        }
    }

    /// Remove an expense by ID. Does nothing when the ID does not match.
    pub fn delete_expense(&mut self, expense_id: &str) {
        self.expenses.retain(|expense| expense.id != expense_id);
    }

    /// Clear all budgets, expenses and the active-budget pointer.
    ///
    /// Irreversible; the confirmation step lives at the UI boundary.
    pub fn reset(&mut self) {
        *self = Ledger::default();
    }
}
