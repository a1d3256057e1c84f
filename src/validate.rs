//! Boundary validation helpers shared by the form endpoints.
//!
//! Validation happens at the endpoints, before anything touches the ledger;
//! the ledger itself trusts its inputs.

use crate::Error;

/// Parse a submitted amount, requiring a finite number greater than zero.
///
/// # Errors
/// Returns [Error::InvalidAmount] with the raw text when the input does not
/// parse or is not positive.
pub fn parse_positive_amount(text: &str) -> Result<f64, Error> {
    let trimmed = text.trim();

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(trimmed.to_owned())),
    }
}

/// Trim a submitted text field, mapping whitespace-only input to `empty_error`.
pub fn require_non_empty(text: &str, empty_error: Error) -> Result<String, Error> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        Err(empty_error)
    } else {
        Ok(trimmed.to_owned())
    }
}
