use validator::{ValidationError, ValidationErrors};

use crate::dto::patch::Patch;

pub fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Records an error when a non-nullable field was explicitly sent as `null`.
pub fn reject_null<T>(errors: &mut ValidationErrors, field: &'static str, patch: &Patch<T>) {
    if patch.is_null() {
        errors.add(field, validation_error("null", "Campo não pode ser nulo"));
    }
}

/// Character-count bounds, matching `#[validate(length(..))]`.
pub fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&String>,
    min: usize,
    max: usize,
) {
    if let Some(value) = value {
        let len = value.chars().count();
        if len < min || len > max {
            errors.add(field, validation_error("length", "Tamanho inválido"));
        }
    }
}

pub fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
