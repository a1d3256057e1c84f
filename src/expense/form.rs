//! The expense form shared by the create and edit pages.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    category::{ALL_CATEGORIES, Category},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE},
    validate::{parse_positive_amount, require_non_empty},
};

/// The raw expense form submission.
///
/// The amount arrives as text so validation failures can echo the input back
/// instead of failing form deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseFormData {
    /// What the expense was for.
    pub label: String,
    /// The amount spent, as typed.
    pub amount: String,
    /// The category slug.
    pub category: Category,
    /// When the expense happened.
    pub date: Date,
}

/// A validated expense form submission.
pub struct ValidatedExpense {
    pub label: String,
    pub amount: f64,
    pub category: Category,
    pub date: Date,
}

impl ExpenseFormData {
    /// Validate the submission at the boundary.
    ///
    /// # Errors
    /// Returns [Error::EmptyExpenseLabel] or [Error::InvalidAmount]; nothing
    /// is mutated on failure.
    pub fn validate(self) -> Result<ValidatedExpense, Error> {
        let label = require_non_empty(&self.label, Error::EmptyExpenseLabel)?;
        let amount = parse_positive_amount(&self.amount)?;

        Ok(ValidatedExpense {
            label,
            amount,
            category: self.category,
            date: self.date,
        })
    }
}

/// The values used to pre-fill the expense form.
pub struct ExpenseFormValues<'a> {
    pub label: &'a str,
    pub amount: &'a str,
    pub category: Category,
    pub date: Date,
}

/// Render the expense form.
///
/// `hx_attribute` selects between `hx-post` (create) and `hx-put` (edit);
/// `endpoint` is the API route the form submits to.
pub fn expense_form_view(
    hx_attribute: &str,
    endpoint: &str,
    values: &ExpenseFormValues,
    submit_text: &str,
) -> Markup {
    html! {
        form
            hx-post=[(hx_attribute == "hx-post").then_some(endpoint)]
            hx-put=[(hx_attribute == "hx-put").then_some(endpoint)]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="label" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="label"
                    type="text"
                    name="label"
                    placeholder="What did you spend on?"
                    value=(values.label)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="any"
                    min="0"
                    placeholder="0.00"
                    value=(values.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category" name="category" class=(FORM_SELECT_STYLE)
                {
                    @for category in ALL_CATEGORIES {
                        option
                            value=(category.as_slug())
                            selected[category == values.category]
                        {
                            (category.display_label())
                        }
                    }
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    value=(values.date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }
        }
    }
}
