//! Request bodies for create and update.
//!
//! Each field is decoded on its own, so a wrongly typed field becomes a
//! [`FieldError`] next to the rule failures of the other fields. Nothing is
//! rejected here: the service decides when the errors matter, which lets an
//! update report an unknown id before it looks at the body.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::models::{FieldError, ItemPayload};

/// Field name used when the body as a whole cannot be read.
pub const BODY_FIELD: &str = "body";

pub const BODY_NOT_OBJECT: &str = "Request body must be a JSON object";
pub const NAME_NOT_STRING: &str = "Field \"name\" must be a string";
pub const PRICE_NOT_NUMBER: &str = "Field \"price\" must be a number";

/// A decoded request body and whatever could not be decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemInput {
    pub payload: ItemPayload,
    pub decode_errors: Vec<FieldError>,
}

impl ItemInput {
    /// Decode a raw body. An empty body counts as `{}`.
    pub fn from_slice(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Self::from_fields(&fields),
            _ => Self {
                payload: ItemPayload::default(),
                decode_errors: vec![FieldError::new(BODY_FIELD, BODY_NOT_OBJECT)],
            },
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut decode_errors = Vec::new();
        let payload = ItemPayload {
            name: decode_field(fields, "name", NAME_NOT_STRING, &mut decode_errors),
            price: decode_field(fields, "price", PRICE_NOT_NUMBER, &mut decode_errors),
        };

        Self {
            payload,
            decode_errors,
        }
    }

    /// The body was not a JSON object, so no field could be read.
    pub fn is_unreadable(&self) -> bool {
        self.decode_errors.iter().any(|e| e.field == BODY_FIELD)
    }

    /// Whether `field` was present but had the wrong type.
    pub fn has_decode_error(&self, field: &str) -> bool {
        self.decode_errors.iter().any(|e| e.field == field)
    }
}

impl From<ItemPayload> for ItemInput {
    fn from(payload: ItemPayload) -> Self {
        Self {
            payload,
            decode_errors: Vec::new(),
        }
    }
}

/// `null` and a missing key both decode to `None`.
fn decode_field<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    field: &'static str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let value = fields.get(field)?;
    Option::<T>::deserialize(value).unwrap_or_else(|_| {
        errors.push(FieldError::new(field, message));
        None
    })
}

/// Reads the body without checking `Content-Type`.
impl<S> FromRequest<S> for ItemInput
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        Ok(Self::from_slice(&body))
    }
}
