use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use ember_store::VaultError;

/// Errors from server setup and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] ember_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Handler-level failure, rendered as a JSON error body.
///
/// Internal details (blob paths, join errors) stay in the logs; the wire
/// only ever carries the generic message for the status class.
#[derive(Debug)]
pub enum ApiError {
    Vault(VaultError),
    PayloadTooLarge { limit_bytes: u64 },
    MissingHeader(&'static str),
}

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        Self::Vault(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Vault(VaultError::NotFound) => (StatusCode::NOT_FOUND, "Not found".to_string()),
            Self::Vault(VaultError::PasswordRequired) => {
                (StatusCode::UNAUTHORIZED, "Password required".to_string())
            }
            Self::Vault(VaultError::Authentication) => (
                StatusCode::UNAUTHORIZED,
                "Invalid password or corrupted data".to_string(),
            ),
            Self::Vault(VaultError::InvalidInput(message)) => (StatusCode::BAD_REQUEST, message),
            Self::Vault(err @ (VaultError::Blob(_) | VaultError::Internal(_))) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
            Self::PayloadTooLarge { limit_bytes } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Payload exceeds the {limit_bytes} byte limit"),
            ),
            Self::MissingHeader(name) => {
                (StatusCode::BAD_REQUEST, format!("Missing {name} header"))
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
