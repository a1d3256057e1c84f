//! Budget management: named budgets, the active-budget switch, and the
//! income sources that derive a budget's total.

mod create;
mod delete;
mod edit;
mod income;
mod list;
mod switch;

pub use create::{create_budget_endpoint, get_new_budget_page};
pub use delete::delete_budget_endpoint;
pub use edit::{get_edit_budget_page, update_budget_endpoint};
pub use income::{
    create_income_endpoint, delete_income_endpoint, get_edit_income_page, get_new_income_page,
    update_income_endpoint,
};
pub use list::get_budgets_page;
pub use switch::switch_budget_endpoint;
