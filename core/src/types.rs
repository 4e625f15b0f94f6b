//! Wire DTOs for the inventory API.
//!
//! These mirror the server's records but are defined independently so the
//! client carries no axum or tokio dependency. The integration test catches
//! schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u64,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// Request payload for creating a product. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u64,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// Request payload for updating a product. Only the fields present in the
/// JSON are applied; omitted fields keep their value on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPatch {
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "quantidade", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
    #[serde(rename = "preco", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// `GET /api/produtos/{id}` wraps its payload in a success flag.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Lookup {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Product>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Shape of every other error body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
