// Validation utilities module
// Custom field validators for request DTOs

use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validates that a purchase amount is strictly positive and finite
pub fn validate_positive_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(error_with_message(
            "amount_must_be_positive",
            "Amount must be greater than zero",
        ))
    }
}

/// Validates that monthly income is zero or greater and finite
pub fn validate_monthly_income(income: f64) -> Result<(), ValidationError> {
    if income.is_finite() && income >= 0.0 {
        Ok(())
    } else {
        Err(error_with_message(
            "income_must_be_non_negative",
            "Monthly income must be zero or greater",
        ))
    }
}

/// Flatten field errors into a single readable message
///
/// Fields are listed alphabetically so the message is stable.
pub fn summarize(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .map(|(field, field_errors)| {
            let reasons: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, reasons.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
