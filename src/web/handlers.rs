//! HTTP handlers for the key routes

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::StoreError;
use crate::service::KvService;

/// Shared application state
pub type AppState = Arc<dyn KvService>;

/// Error body returned on failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Translates store failures into HTTP responses
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not found".to_string()),
            StoreError::MalformedInput(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            StoreError::Encode(_) => {
                error!("Failed to store value: {}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "unable to store value".to_string())
            }
            StoreError::Decode(_) => {
                error!("Failed to read value: {}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, "unable to read value".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// GET /:key
pub async fn get_key(
    State(kv): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let value = kv.get(&key)?;
    Ok((StatusCode::OK, Json(value)))
}

/// PUT /:key - the raw body is normalized and stored
pub async fn put_key(
    State(kv): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    debug!("Storing {} bytes under '{}'", body.len(), key);

    kv.put(&key, &body)?;
    // Accepted with an empty JSON object as body
    Ok((StatusCode::ACCEPTED, Json(json!({}))))
}

/// DELETE /:key
pub async fn delete_key(
    State(kv): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    kv.delete(&key)?;
    Ok(StatusCode::OK)
}

/// GET / - list all keys
pub async fn list_keys(State(kv): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(kv.list_keys()))
}
