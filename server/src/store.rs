//! In-memory product collection with deterministic id allocation.
//!
//! # Design
//! `ProductStore` is a plain owned value with synchronous methods. It never
//! validates its inputs: callers hand it an already-checked `NewProduct` or
//! `ProductPatch`. Sharing and exclusion are the HTTP layer's concern, which
//! wraps one instance in `Arc<RwLock<_>>` (see `AppState`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single inventory record as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: u64,
    #[serde(rename = "preco")]
    pub price: f64,
}

/// A validated draft waiting for an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub quantity: u64,
    pub price: f64,
}

/// Fields to overwrite on an existing product. `None` keeps the prior value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<f64>,
}

impl ProductPatch {
    /// Copy of `existing` with every present field overwritten. The id is
    /// always the existing one.
    pub fn apply_to(&self, existing: &Product) -> Product {
        Product {
            id: existing.id,
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            quantity: self.quantity.unwrap_or(existing.quantity),
            price: self.price.unwrap_or(existing.price),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(u64),
    #[error("no product id left to allocate")]
    IdSpaceExhausted,
}

#[derive(Debug, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two demo products the inventory ships with.
    pub fn seeded() -> Self {
        Self {
            products: vec![
                Product {
                    id: 1,
                    name: "Produto A".to_string(),
                    quantity: 10,
                    price: 15.99,
                },
                Product {
                    id: 2,
                    name: "Produto B".to_string(),
                    quantity: 5,
                    price: 20.50,
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Stores `draft` under `max(existing ids) + 1`, or 1 when empty.
    pub fn create(&mut self, draft: NewProduct) -> Result<Product, StoreError> {
        let id = self
            .products
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted)?;
        let product = Product {
            id,
            name: draft.name,
            quantity: draft.quantity,
            price: draft.price,
        };
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn update(&mut self, id: u64, patch: &ProductPatch) -> Result<Product, StoreError> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = patch.apply_to(slot);
        Ok(slot.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.products.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            quantity: 1,
            price: 2.5,
        }
    }

    #[test]
    fn product_serializes_with_wire_names() {
        let product = Product {
            id: 7,
            name: "Caneta".to_string(),
            quantity: 3,
            price: 1.25,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "nome": "Caneta", "quantidade": 3, "preco": 1.25})
        );
    }

    #[test]
    fn create_assigns_sequential_ids_from_empty() {
        let mut store = ProductStore::new();
        let ids: Vec<u64> = (0..5)
            .map(|i| store.create(draft(&format!("p{i}"))).unwrap().id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p0", "p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn create_uses_max_id_not_count() {
        let mut store = ProductStore::new();
        for i in 0..3 {
            store.create(draft(&format!("p{i}"))).unwrap();
        }
        store.delete(1).unwrap();
        // ids are now {2, 3}: count + 1 would collide with 3
        assert_eq!(store.create(draft("next")).unwrap().id, 4);
    }

    #[test]
    fn deleting_the_maximum_frees_its_id() {
        let mut store = ProductStore::new();
        store.create(draft("a")).unwrap();
        store.create(draft("b")).unwrap();
        store.delete(2).unwrap();
        assert_eq!(store.create(draft("c")).unwrap().id, 2);

        store.delete(1).unwrap();
        store.delete(2).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.create(draft("d")).unwrap().id, 1);
    }

    #[test]
    fn create_fails_when_ids_run_out() {
        let mut store = ProductStore {
            products: vec![Product {
                id: u64::MAX,
                name: "last".to_string(),
                quantity: 0,
                price: 0.0,
            }],
        };
        assert_eq!(store.create(draft("x")), Err(StoreError::IdSpaceExhausted));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seeded_store_continues_after_demo_products() {
        let mut store = ProductStore::seeded();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).unwrap().name, "Produto B");
        assert_eq!(store.create(draft("c")).unwrap().id, 3);
    }

    #[test]
    fn update_merges_present_fields_only() {
        let mut store = ProductStore::new();
        store.create(draft("lapis")).unwrap();
        let patch = ProductPatch {
            price: Some(9.0),
            ..ProductPatch::default()
        };
        let updated = store.update(1, &patch).unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "lapis");
        assert_eq!(updated.quantity, 1);
        assert_eq!(updated.price, 9.0);
        assert_eq!(store.get(1), Some(&updated));
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut store = ProductStore::new();
        let err = store.update(3, &ProductPatch::default()).unwrap_err();
        assert_eq!(err, StoreError::NotFound(3));
    }

    #[test]
    fn delete_missing_id_leaves_collection_unchanged() {
        let mut store = ProductStore::seeded();
        assert_eq!(store.delete(42), Err(StoreError::NotFound(42)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_keeps_insertion_order() {
        let mut store = ProductStore::seeded();
        store
            .update(
                1,
                &ProductPatch {
                    name: Some("Renomeado".to_string()),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
        let ids: Vec<u64> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
