//! Conversion of `validator` results into [`AppError`].

use docvault_core::error::AppError;
use validator::{Validate, ValidationErrors};

/// Run derive-based validation, mapping failures to `Validation` errors.
pub(crate) fn validate<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(into_app_error)
}

fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect();

    AppError::validation(messages.join("; "))
}
