//! Response-shape decoding for the catalog API.
//!
//! ## Observed shapes
//!
//! ### Products
//! `GET /products/{category}` returns a bare JSON array of product objects.
//!
//! ### Availability
//! `GET /availability/{manufacturer}` returns `{"code": 200, "response": [...]}`.
//! When the upstream fails internally it still answers 200, but `response`
//! becomes the *string* `"[]"` instead of an array. Older deployments served
//! a bare array here as well.
//!
//! Bodies are matched against an ordered list of [`ResponseShape`]s and the
//! first one that decodes wins. A body that matches nothing is reported as a
//! [`DecodeFailure`], which the client treats as retriable.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use stockboard_core::{DecodeMode, ProductRecord};
use thiserror::Error;

/// A known envelope around a list of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `[ {...}, {...} ]`
    BareArray,
    /// Any object with a `response` array; other fields are ignored.
    ResponseField,
    /// `{ "code": <number>, "response": [ ... ] }` with both fields required.
    CodedEnvelope,
}

impl ResponseShape {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ResponseShape::BareArray => "bare array",
            ResponseShape::ResponseField => "response field",
            ResponseShape::CodedEnvelope => "coded envelope",
        }
    }

    /// Decodes `value` as this shape, or returns the reason it does not fit.
    fn decode<T: DeserializeOwned>(self, value: &Value) -> Result<Vec<T>, String> {
        match self {
            ResponseShape::BareArray => {
                if !value.is_array() {
                    return Err("not an array".to_string());
                }
                Vec::<T>::deserialize(value).map_err(|e| e.to_string())
            }
            ResponseShape::ResponseField => {
                let inner = value
                    .get("response")
                    .filter(|r| r.is_array())
                    .ok_or_else(|| "no `response` array".to_string())?;
                Vec::<T>::deserialize(inner).map_err(|e| e.to_string())
            }
            ResponseShape::CodedEnvelope => CodedEnvelope::<T>::deserialize(value)
                .map(|envelope| envelope.response)
                .map_err(|e| e.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct CodedEnvelope<T> {
    #[allow(dead_code)]
    code: serde_json::Number,
    response: Vec<T>,
}

/// Product as decoded in strict mode: every wire field must be present.
///
/// The lenient path decodes straight into [`ProductRecord`], which tolerates a
/// missing `color`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidatedProduct {
    pub id: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub name: String,
    pub color: Vec<String>,
    pub price: f64,
    pub manufacturer: String,
}

impl From<ValidatedProduct> for ProductRecord {
    fn from(product: ValidatedProduct) -> Self {
        ProductRecord {
            id: product.id,
            name: product.name,
            product_type: product.product_type,
            manufacturer: product.manufacturer,
            color: product.color,
            price: product.price,
            availability: String::new(),
        }
    }
}

/// The two endpoint families served by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Products,
    Availability,
}

impl Resource {
    /// Shapes accepted for this resource, in the order they are attempted.
    #[must_use]
    pub fn shapes(self, mode: DecodeMode) -> &'static [ResponseShape] {
        match (self, mode) {
            (_, DecodeMode::Lenient) => &[ResponseShape::BareArray, ResponseShape::ResponseField],
            (Resource::Products, DecodeMode::Strict) => &[ResponseShape::BareArray],
            (Resource::Availability, DecodeMode::Strict) => &[ResponseShape::CodedEnvelope],
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeFailure {
    #[error("empty body")]
    Empty,

    #[error("body is not JSON: {0}")]
    NotJson(String),

    #[error("body matched none of the expected shapes ({0})")]
    NoMatchingShape(String),
}

/// Decodes a raw response body into records using the first matching shape.
///
/// An empty body and a literal `null` both count as [`DecodeFailure::Empty`].
///
/// # Errors
///
/// Returns a [`DecodeFailure`] when the body is empty, not JSON, or does not
/// fit any of `shapes`.
pub fn decode_records<T: DeserializeOwned>(
    body: &str,
    shapes: &[ResponseShape],
) -> Result<Vec<T>, DecodeFailure> {
    if body.trim().is_empty() {
        return Err(DecodeFailure::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| DecodeFailure::NotJson(e.to_string()))?;
    if value.is_null() {
        return Err(DecodeFailure::Empty);
    }

    let mut misses = Vec::with_capacity(shapes.len());
    for shape in shapes {
        match shape.decode::<T>(&value) {
            Ok(records) => return Ok(records),
            Err(reason) => misses.push(format!("{}: {reason}", shape.name())),
        }
    }

    Err(DecodeFailure::NoMatchingShape(misses.join("; ")))
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
