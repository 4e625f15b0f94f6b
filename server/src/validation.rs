//! Schema checks for product payloads.
//!
//! Bodies arrive as raw `serde_json::Value` so each rule can be checked
//! against the semantic type of the field (non-empty text, non-negative
//! integer, non-negative real) in a fixed order: name, quantity, price. The
//! first failing rule is reported.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::store::{NewProduct, Product, ProductPatch};

const NAME: &str = "nome";
const QUANTITY: &str = "quantidade";
const PRICE: &str = "preco";

/// The messages are part of the API contract; the browser client shows them
/// to the user verbatim.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Nome inválido")]
    InvalidName,
    #[error("Quantidade inválida")]
    InvalidQuantity,
    #[error("Preço inválido")]
    InvalidPrice,
}

/// Validate a create body.
pub fn validate_new(body: &Value) -> Result<NewProduct, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::InvalidName)?;
    check(fields.get(NAME), fields.get(QUANTITY), fields.get(PRICE))
}

/// Validate an update body against the record it would produce.
///
/// Keys missing from `body` are taken from `existing` before the rules run,
/// so a partial body is valid as long as the merged record is. The returned
/// patch only carries the keys that were present.
pub fn validate_patch(existing: &Product, body: &Value) -> Result<ProductPatch, ValidationError> {
    let fields = body.as_object().ok_or(ValidationError::InvalidName)?;

    let current = serde_json::json!({
        NAME: existing.name,
        QUANTITY: existing.quantity,
        PRICE: existing.price,
    });
    let pick = |key: &str| fields.get(key).or_else(|| current.get(key));

    let merged = check(pick(NAME), pick(QUANTITY), pick(PRICE))?;
    Ok(ProductPatch {
        name: present(fields, NAME).then_some(merged.name),
        quantity: present(fields, QUANTITY).then_some(merged.quantity),
        price: present(fields, PRICE).then_some(merged.price),
    })
}

fn present(fields: &Map<String, Value>, key: &str) -> bool {
    fields.contains_key(key)
}

fn check(
    name: Option<&Value>,
    quantity: Option<&Value>,
    price: Option<&Value>,
) -> Result<NewProduct, ValidationError> {
    let name = match name {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(ValidationError::InvalidName),
    };
    let quantity = quantity
        .and_then(as_quantity)
        .ok_or(ValidationError::InvalidQuantity)?;
    let price = price.and_then(as_price).ok_or(ValidationError::InvalidPrice)?;
    Ok(NewProduct {
        name,
        quantity,
        price,
    })
}

/// Integers, integral floats and numeric strings are all accepted, as long
/// as the value is a whole number >= 0.
fn as_quantity(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(q) => Some(q),
            None if n.is_i64() => None,
            None => n.as_f64().and_then(whole),
        },
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }
}

fn whole(f: f64) -> Option<u64> {
    (f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64).then(|| f as u64)
}

fn as_price(value: &Value) -> Option<f64> {
    let price = value.as_f64()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}
