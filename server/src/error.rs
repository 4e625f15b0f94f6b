//! Request-boundary errors and their JSON rendering.
//!
//! Every failure a handler can hit ends up here and leaves as
//! `{"error": <message>}` with a matching status. Internal failures never
//! expose their cause to the client; the cause is logged instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("JSON inválido")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Produto não encontrado")]
    NotFound,

    #[error("Rota não encontrada")]
    RouteNotFound,

    #[error("Erro interno no servidor")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::IdSpaceExhausted => {
                tracing::error!(error = %err, "store refused the write");
                ApiError::Internal
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_passes_through() {
        let err = ApiError::from(ValidationError::InvalidPrice);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Preço inválido");
    }

    #[test]
    fn store_errors_map_to_status() {
        assert_eq!(
            ApiError::from(StoreError::NotFound(3)).status(),
            StatusCode::NOT_FOUND
        );
        let internal = ApiError::from(StoreError::IdSpaceExhausted);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_string(), "Erro interno no servidor");
    }

    #[test]
    fn malformed_json_hides_parser_detail() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = ApiError::MalformedJson(parse_err);
        assert_eq!(err.to_string(), "JSON inválido");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
