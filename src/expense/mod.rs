//! Expense tracking: the expense table, and the create/edit/delete flows.

mod create;
mod delete;
mod edit;
mod form;
mod list;

pub use create::{create_expense_endpoint, get_new_expense_page};
pub use delete::delete_expense_endpoint;
pub use edit::{get_edit_expense_page, update_expense_endpoint};
pub use list::get_expenses_page;
