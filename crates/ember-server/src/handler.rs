use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use ember_store::{CreateContent, CreateRequest, DropPreview, RetrievedDrop, VaultError};
use ember_types::{DropId, DropMeta};

use crate::error::ApiError;
use crate::state::AppState;

const FILENAME_HEADER: &str = "x-drop-filename";
const TTL_HEADER: &str = "x-drop-ttl-minutes";
const BURN_HEADER: &str = "x-drop-burn";
const PASSWORD_HEADER: &str = "x-drop-password";

/// Health check handler.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "name": "ember-server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateTextBody {
    pub content: String,
    #[serde(default)]
    pub ttl_minutes: i64,
    #[serde(default)]
    pub burn_after_read: bool,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub markdown: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: DropId,
}

/// POST /api/drops/text
pub async fn create_text(
    State(state): State<AppState>,
    Json(body): Json<CreateTextBody>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    if body.content.len() as u64 > state.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge {
            limit_bytes: state.max_upload_bytes,
        });
    }

    let request = CreateRequest {
        content: CreateContent::Text {
            body: body.content,
            markdown: body.markdown,
        },
        ttl_minutes: body.ttl_minutes,
        burn_after_read: body.burn_after_read,
        password: body.password,
    };
    let id = run_vault(state, move |vault| vault.create(request)).await?;
    Ok((StatusCode::CREATED, Json(CreateResponse { id })))
}

/// POST /api/drops/file
///
/// Raw binary body; the file name rides in `X-Drop-Filename` and the
/// stored mime is the request `Content-Type`. Ttl, burn, and password
/// arrive as headers so the body stays opaque bytes.
pub async fn create_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let filename = header_str(&headers, FILENAME_HEADER)
        .ok_or(ApiError::MissingHeader("X-Drop-Filename"))?
        .to_string();
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let ttl_minutes = header_str(&headers, TTL_HEADER)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0);
    let burn_after_read = header_str(&headers, BURN_HEADER)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let password = header_str(&headers, PASSWORD_HEADER).map(String::from);

    if body.len() as u64 > state.max_upload_bytes {
        return Err(ApiError::PayloadTooLarge {
            limit_bytes: state.max_upload_bytes,
        });
    }

    let request = CreateRequest {
        content: CreateContent::File {
            filename,
            mime,
            bytes: body.to_vec(),
        },
        ttl_minutes,
        burn_after_read,
        password,
    };
    let id = run_vault(state, move |vault| vault.create(request)).await?;
    Ok((StatusCode::CREATED, Json(CreateResponse { id })))
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub kind: String,
    pub has_password: bool,
    pub burn_after_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl From<DropPreview> for PreviewResponse {
    fn from(preview: DropPreview) -> Self {
        let (markdown, filename, size) = match preview.meta {
            DropMeta::Text { markdown } => (Some(markdown), None, None),
            DropMeta::File {
                filename, size, ..
            } => (None, Some(filename), Some(size)),
        };
        Self {
            kind: preview.kind.to_string(),
            has_password: preview.has_password,
            burn_after_read: preview.burn_after_read,
            markdown,
            filename,
            size,
        }
    }
}

/// GET /api/drops/:id
pub async fn inspect(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let id = parse_id(&id)?;
    let preview = state.vault.inspect(&id)?;
    Ok(Json(preview.into()))
}

#[derive(Debug, Default, Deserialize)]
pub struct RetrieveBody {
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/drops/:id/retrieve
///
/// Text drops come back as JSON; file drops as raw bytes with the stored
/// mime in `Content-Type` and the name in `X-Drop-Filename`.
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RetrieveBody>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let retrieved = run_vault(state, move |vault| {
        vault.retrieve(&id, body.password.as_deref())
    })
    .await?;

    match retrieved {
        RetrievedDrop::Text { body, markdown } => Ok(Json(json!({
            "content": body,
            "markdown": markdown,
        }))
        .into_response()),
        RetrievedDrop::File {
            bytes,
            filename,
            mime,
        } => {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_str(&mime)
                    .unwrap_or(HeaderValue::from_static("application/octet-stream")),
            );
            headers.insert(
                FILENAME_HEADER,
                HeaderValue::from_str(&filename).unwrap_or(HeaderValue::from_static("download")),
            );
            Ok((StatusCode::OK, headers, bytes).into_response())
        }
    }
}

/// Run a vault operation on the blocking pool. Password key stretching
/// takes hundreds of milliseconds and must not stall the async runtime.
async fn run_vault<T, F>(state: AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ember_store::DropVault) -> Result<T, VaultError> + Send + 'static,
{
    let vault = state.vault.clone();
    tokio::task::spawn_blocking(move || op(&vault))
        .await
        .map_err(|e| ApiError::Vault(VaultError::Internal(e.to_string())))?
        .map_err(ApiError::from)
}

/// An unparseable id cannot name a drop; report it the same way as an
/// unknown one.
fn parse_id(raw: &str) -> Result<DropId, ApiError> {
    DropId::parse(raw).map_err(|_| ApiError::Vault(VaultError::NotFound))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
