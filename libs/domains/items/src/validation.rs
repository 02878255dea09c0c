//! Field rules shared by create and update.

use validator::Validate;

use crate::input::ItemInput;
use crate::models::{FieldError, ItemPayload};

pub const NAME_REQUIRED: &str = "Field \"name\" is required";
pub const PRICE_REQUIRED: &str = "Field \"price\" is required";
pub const PRICE_NEGATIVE: &str = "Field \"price\" cannot be negative";
pub const PRICE_TOO_LARGE: &str = "Field \"price\" cannot exceed 1000000000000000";

/// Largest accepted price.
pub const MAX_PRICE: f64 = 1e15;

/// Fields in the order their errors are reported.
const FIELD_ORDER: [&str; 2] = ["name", "price"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// `name` must be present
    Create,
    /// `name` may be omitted, but not blank
    Update,
}

impl ValidationMode {
    fn requires_name(self) -> bool {
        matches!(self, ValidationMode::Create)
    }
}

/// Check `payload` against every rule and collect all failures.
///
/// An empty vector means the payload is acceptable for `mode`.
pub fn validate_item(payload: &ItemPayload, mode: ValidationMode) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if mode.requires_name() && payload.name.is_none() {
        errors.push(FieldError::new("name", NAME_REQUIRED));
    }

    if let Err(report) = payload.validate() {
        let by_field = report.field_errors();

        for field in FIELD_ORDER {
            let Some(failures) = by_field.get(field) else {
                continue;
            };
            // Every rule on ItemPayload declares its message.
            errors.extend(
                failures
                    .iter()
                    .filter_map(|failure| failure.message.as_deref())
                    .map(|message| FieldError::new(field, message)),
            );
        }
    }

    errors
}

/// [`validate_item`] for a request body, including its decode errors.
///
/// A field with the wrong type reports only that, in place of its rule
/// failures. An unreadable body reports nothing else.
pub fn validate_input(input: &ItemInput, mode: ValidationMode) -> Vec<FieldError> {
    if input.is_unreadable() {
        return input.decode_errors.clone();
    }

    let mut errors: Vec<FieldError> = validate_item(&input.payload, mode)
        .into_iter()
        .filter(|error| !input.has_decode_error(&error.field))
        .chain(input.decode_errors.iter().cloned())
        .collect();
    errors.sort_by_key(|error| FIELD_ORDER.iter().position(|field| *field == error.field));
    errors
}
