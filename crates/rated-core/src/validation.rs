//! Validation utilities.

use crate::{FieldError, RatedError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `RatedError` on failure.
    fn validate_request(&self) -> Result<(), RatedError> {
        self.validate().map_err(validation_errors_to_rated_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `RatedError`.
#[must_use]
pub fn validation_errors_to_rated_error(errors: ValidationErrors) -> RatedError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    RatedError::InvalidFields(field_errors)
}

/// Common validation functions.
pub mod rules {
    use crate::Stars;
    use rust_decimal::Decimal;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a star rating lies in [0, 5] with at most one decimal.
    pub fn valid_stars(value: &Decimal) -> Result<(), ValidationError> {
        Stars::new(*value)
            .map(|_| ())
            .map_err(|_| ValidationError::new("stars_range"))
    }
}
