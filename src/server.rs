//! Read-only HTTP endpoints over one immutable catalog snapshot.
//!
//! | Route               | Response                                          |
//! |---------------------|---------------------------------------------------|
//! | `/health`           | `{status, languages, digest}`                     |
//! | `/catalog`          | the normalized catalog, with a SHA-256 `ETag`     |
//! | `/catalog/upstream` | the upstream catalog exactly as fetched           |
//! | `/catalog/export`   | writes the catalog to disk, then sends it as a download |
//!
//! Both catalog bodies are serialized once when the snapshot is built. The
//! snapshot is shared behind an `Arc` and never mutated; a newer catalog means
//! a new snapshot and a new router.

use crate::types::Language;
use axum::extract::State;
use axum::http::header::{self, HeaderMap, HeaderValue, InvalidHeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

fn json_content_type() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Everything the handlers serve, computed up front.
#[derive(Debug)]
pub struct Snapshot {
    upstream_json: String,
    catalog_json: String,
    export_json: String,
    digest: String,
    etag: HeaderValue,
    languages: usize,
    export_path: PathBuf,
    content_disposition: HeaderValue,
}

impl Snapshot {
    pub fn new(
        upstream: &serde_json::Value,
        catalog: &[Language],
        export_path: PathBuf,
    ) -> Result<Self, ServeError> {
        let catalog_json = serde_json::to_string(catalog)?;
        let digest = format!("{:x}", Sha256::digest(catalog_json.as_bytes()));
        let etag = HeaderValue::from_str(&format!("\"{digest}\""))?;

        let file_name = export_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string());
        let content_disposition =
            HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))?;

        Ok(Self {
            upstream_json: serde_json::to_string(upstream)?,
            export_json: serde_json::to_string_pretty(catalog)?,
            catalog_json,
            digest,
            etag,
            languages: catalog.len(),
            export_path,
            content_disposition,
        })
    }

    /// SHA-256 of the served catalog body, hex encoded.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    languages: usize,
    digest: String,
}

async fn health(State(snapshot): State<Arc<Snapshot>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        languages: snapshot.languages,
        digest: snapshot.digest.clone(),
    })
}

async fn upstream(State(snapshot): State<Arc<Snapshot>>) -> Response {
    (
        [(header::CONTENT_TYPE, json_content_type())],
        snapshot.upstream_json.clone(),
    )
        .into_response()
}

async fn catalog(State(snapshot): State<Arc<Snapshot>>, headers: HeaderMap) -> Response {
    if headers.get(header::IF_NONE_MATCH) == Some(&snapshot.etag) {
        return (
            StatusCode::NOT_MODIFIED,
            [(header::ETAG, snapshot.etag.clone())],
        )
            .into_response();
    }
    (
        [
            (header::CONTENT_TYPE, json_content_type()),
            (header::ETAG, snapshot.etag.clone()),
        ],
        snapshot.catalog_json.clone(),
    )
        .into_response()
}

async fn export(State(snapshot): State<Arc<Snapshot>>) -> Result<Response, (StatusCode, String)> {
    tokio::fs::write(&snapshot.export_path, &snapshot.export_json)
        .await
        .map_err(|e| {
            tracing::error!(path = %snapshot.export_path.display(), "export failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to write {}: {e}", snapshot.export_path.display()),
            )
        })?;
    tracing::info!(path = %snapshot.export_path.display(), "catalog exported");

    Ok((
        [
            (header::CONTENT_TYPE, json_content_type()),
            (header::CONTENT_DISPOSITION, snapshot.content_disposition.clone()),
        ],
        snapshot.export_json.clone(),
    )
        .into_response())
}

/// All routes over one snapshot.
pub fn router(snapshot: Arc<Snapshot>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/catalog", get(catalog))
        .route("/catalog/upstream", get(upstream))
        .route("/catalog/export", get(export))
        .layer(CorsLayer::permissive())
        .with_state(snapshot)
}

/// Bind `address` and serve until the process is stopped.
pub async fn serve(snapshot: Snapshot, address: &str) -> Result<(), ServeError> {
    let app = router(Arc::new(snapshot));
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("catalog server listening on {address}");
    axum::serve(listener, app).await?;
    Ok(())
}
