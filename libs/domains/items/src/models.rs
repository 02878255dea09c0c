use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::validation::{MAX_PRICE, PRICE_TOO_LARGE};

/// Prices above [`MAX_PRICE`] do not fit the `NUMERIC` column mapping.
fn price_within_limit(price: f64) -> Result<(), ValidationError> {
    if price > MAX_PRICE {
        return Err(
            ValidationError::new("price_too_large").with_message(Cow::Borrowed(PRICE_TOO_LARGE)),
        );
    }
    Ok(())
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Generated on create, never changed afterwards
    #[schema(example = 4312558)]
    pub id: i64,
    #[schema(example = "Pen")]
    pub name: String,
    /// Non-negative, fractional allowed
    #[schema(example = 1.5)]
    pub price: f64,
}

/// Request body for `POST /items` and `PUT /items/{id}`.
///
/// Both fields are optional at the type level so that every missing field can
/// be reported at once; see [`validate_item`](crate::validation::validate_item).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct ItemPayload {
    #[validate(length(min = 1, message = "Field \"name\" is required"))]
    pub name: Option<String>,

    #[validate(
        required(message = "Field \"price\" is required"),
        range(min = 0.0, message = "Field \"price\" cannot be negative"),
        custom(function = "price_within_limit")
    )]
    pub price: Option<f64>,
}

impl ItemPayload {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
        }
    }
}

/// Fields to overwrite on an existing item. `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl ItemChanges {
    pub fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
    }
}

impl From<ItemPayload> for ItemChanges {
    fn from(payload: ItemPayload) -> Self {
        Self {
            name: payload.name,
            price: payload.price,
        }
    }
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "price")]
    pub field: String,
    #[schema(example = "Field \"price\" cannot be negative")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// `400` body for rejected payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// `404` body for unknown ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NotFoundBody {
    #[schema(example = "Item not found")]
    pub error: String,
}
