//! HTTP client for the MRL cockpit backend.
//!
//! | Method | Path          | Body                         |
//! |--------|---------------|------------------------------|
//! | POST   | `/api/import` | multipart, one `file` field  |
//! | POST   | `/api/submit` | none (`application/json`)    |
//!
//! The backend keeps the records accepted by the last import and appends
//! them on submit; no identifier ties the two calls together.

use async_trait::async_trait;
use gloo_net::http::Request;
use js_sys::{Array, Uint8Array};
use serde_json::Value;
use web_sys::{Blob, BlobPropertyBag, FormData};

use crate::config::{endpoint, API_BASE_URL, IMPORT_PATH, SUBMIT_PATH, UPLOAD_FIELD};
use crate::error::{ServiceError, ServiceResult};
use crate::session::SelectedFile;
use crate::types::{ImportResponse, SubmitResponse};

/// The two backend calls the workflow needs.
///
/// Futures are not `Send`: the page runs on a single thread.
#[async_trait(?Send)]
pub trait ImportBackend {
    /// Full URL of an endpoint, for messages.
    fn endpoint_url(&self, path: &str) -> String;

    /// Upload a file for validation.
    async fn import(&self, file: &SelectedFile) -> ServiceResult<ImportResponse>;

    /// Submit the records retained since the last import.
    async fn submit(&self) -> ServiceResult<SubmitResponse>;
}

/// [`ImportBackend`] over `fetch`.
///
/// No timeout is set: a missing response only shows up as a transport failure.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

#[async_trait(?Send)]
impl ImportBackend for HttpBackend {
    fn endpoint_url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    async fn import(&self, file: &SelectedFile) -> ServiceResult<ImportResponse> {
        let url = self.endpoint_url(IMPORT_PATH);
        log::info!("📤 Uploading {} ({} bytes) to {}", file.name, file.bytes.len(), url);

        let request = Request::post(&url)
            .body(upload_form(file)?)
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        parse_import_reply(status, &body)
    }

    async fn submit(&self) -> ServiceResult<SubmitResponse> {
        let url = self.endpoint_url(SUBMIT_PATH);
        log::info!("📤 Submitting to {}", url);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        parse_submit_reply(status, &body)
    }
}

/// Multipart body with the file bytes under [`UPLOAD_FIELD`].
fn upload_form(file: &SelectedFile) -> ServiceResult<FormData> {
    let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type("application/xml");

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| ServiceError::Request(format!("Failed to create Blob: {:?}", e)))?;

    let form = FormData::new()
        .map_err(|e| ServiceError::Request(format!("Failed to create FormData: {:?}", e)))?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
        .map_err(|e| ServiceError::Request(format!("Failed to append file: {:?}", e)))?;

    Ok(form)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interpret the import endpoint's reply.
pub fn parse_import_reply(status: u16, body: &str) -> ServiceResult<ImportResponse> {
    if !is_success(status) {
        return Err(ServiceError::Status {
            status,
            message: extract_message(body),
        });
    }

    serde_json::from_str(body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}

/// Interpret the submit endpoint's reply.
///
/// Refusals come back as a `SubmitResponse` body too, with a 4xx/5xx status.
pub fn parse_submit_reply(status: u16, body: &str) -> ServiceResult<SubmitResponse> {
    let parsed = serde_json::from_str::<SubmitResponse>(body);

    if !is_success(status) {
        let message = parsed
            .ok()
            .and_then(|r| r.message)
            .or_else(|| extract_message(body));
        return Err(ServiceError::Status { status, message });
    }

    parsed.map_err(|e| ServiceError::InvalidResponse(e.to_string()))
}

/// Best-effort message from an error body, which may not be JSON at all.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        Err(_) => Some(trimmed.chars().take(200).collect()),
    }
}
