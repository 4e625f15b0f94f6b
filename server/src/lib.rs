//! HTTP inventory service: an in-memory product store behind five JSON
//! endpoints under `/api/produtos`, plus the browser client's static files.
//!
//! # Design
//! - One `ProductStore` is created at startup and shared through `AppState`
//!   as `Arc<RwLock<_>>`. Each handler holds the lock across its whole
//!   validate-then-mutate step, so a request never observes another
//!   request's half-applied change.
//! - Bodies are parsed to `serde_json::Value` and checked by `validation`
//!   before the store is touched.
//! - Failures leave through `ApiError`; panics are caught by
//!   `telemetry::catch_panics` and become 500s.

pub mod assets;
pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod validation;

use std::{path::PathBuf, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info, warn};

pub use config::Config;
pub use error::ApiError;
pub use store::{NewProduct, Product, ProductPatch, ProductStore};

pub type Db = Arc<RwLock<ProductStore>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: ProductStore, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            db: Arc::new(RwLock::new(store)),
            public_dir: Arc::new(public_dir.into()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let store = if config.seed {
            ProductStore::seeded()
        } else {
            ProductStore::new()
        };
        Self::new(store, config.public_dir.clone())
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn public_dir(&self) -> &std::path::Path {
        &self.public_dir
    }
}

/// Router over an empty store, serving assets from `./public`.
pub fn app() -> Router {
    router(AppState::new(ProductStore::new(), "public"))
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/produtos", get(list_products).post(create_product))
        .route(
            "/produtos/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .fallback(api_not_found)
        .layer(middleware::map_response(json_content_type));

    Router::new()
        .nest("/api", api)
        .fallback(assets::serve)
        .layer(middleware::from_fn(telemetry::catch_panics))
        .layer(middleware::from_fn(telemetry::request_span))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}

/// Body of `GET /api/produtos/{id}`, which unlike the other endpoints wraps
/// its payload in a success flag.
#[derive(Debug, Serialize)]
pub struct Lookup {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Lookup {
    fn found(product: Product) -> Self {
        Self {
            success: true,
            data: Some(product),
            error: None,
        }
    }

    fn missing() -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError::NotFound.to_string()),
        }
    }
}

/// Ids that are not non-negative integers can never match a product.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::NotFound)
}

/// An empty body counts as an empty object.
fn parse_body(bytes: &Bytes) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes).map_err(|err| {
        warn!(error = %err, "rejected malformed body");
        ApiError::MalformedJson(err)
    })
}

async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let store = state.db.read().await;
    debug!(count = store.len(), "listing products");
    Json(store.list().to_vec())
}

async fn get_product(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let store = state.db.read().await;
    let found = parse_id(&raw_id).ok().and_then(|id| store.get(id));
    match found {
        Some(product) => (StatusCode::OK, Json(Lookup::found(product.clone()))).into_response(),
        None => {
            debug!(id = %raw_id, "product lookup missed");
            (StatusCode::NOT_FOUND, Json(Lookup::missing())).into_response()
        }
    }
}

async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let body = parse_body(&body)?;
    let draft = validation::validate_new(&body).inspect_err(|err| {
        warn!(reason = %err, "create rejected");
    })?;
    let product = state.db.write().await.create(draft)?;
    info!(id = product.id, name = %product.name, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Existence is checked before the body is even parsed.
async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let mut store = state.db.write().await;
    let existing = store.get(id).ok_or(ApiError::NotFound)?;
    let body = parse_body(&body)?;
    let patch = validation::validate_patch(existing, &body).inspect_err(|err| {
        warn!(id, reason = %err, "update rejected");
    })?;
    let product = store.update(id, &patch)?;
    info!(id, "product updated");
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.db.write().await.delete(id)?;
    info!(id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn api_not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn json_content_type(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_found_has_no_error_key() {
        let product = Product {
            id: 1,
            name: "Test".to_string(),
            quantity: 2,
            price: 3.5,
        };
        let json = serde_json::to_value(Lookup::found(product)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["nome"], "Test");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn lookup_missing_has_no_data_key() {
        let json = serde_json::to_value(Lookup::missing()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Produto não encontrado"})
        );
    }

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound)));
        assert!(matches!(parse_id("-1"), Err(ApiError::NotFound)));
    }

    #[test]
    fn blank_body_is_an_empty_object() {
        let value = parse_body(&Bytes::from_static(b"  \n")).unwrap();
        assert_eq!(value, serde_json::json!({}));
        assert!(matches!(
            parse_body(&Bytes::from_static(b"{nome")),
            Err(ApiError::MalformedJson(_))
        ));
    }
}
