//! Mock backend for testing.
//!
//! Returns scripted replies and counts calls, so tests can assert that a
//! rejected action never reached the network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{ServiceError, ServiceResult};
use crate::session::SelectedFile;
use crate::types::{ImportResponse, SubmitResponse};

use super::ImportBackend;

/// Scripted [`ImportBackend`].
pub struct MockBackend {
    import_reply: Mutex<ServiceResult<ImportResponse>>,
    submit_reply: Mutex<ServiceResult<SubmitResponse>>,
    import_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    last_upload: Mutex<Option<SelectedFile>>,
    silent: AtomicBool,
}

impl MockBackend {
    /// Accepts one valid record and submits successfully.
    pub fn new() -> Self {
        Self::accepting(1, 0, Vec::new())
    }

    /// Import replies with the given counts; submit succeeds.
    pub fn accepting(valid: usize, invalid: usize, errors: Vec<String>) -> Self {
        let response = ImportResponse {
            valid: invalid == 0 && valid > 0,
            total_records: Some(valid + invalid),
            valid_records_count: valid,
            invalid_records_count: invalid,
            errors,
            valid_records: Vec::new(),
        };
        Self {
            import_reply: Mutex::new(Ok(response)),
            submit_reply: Mutex::new(Ok(SubmitResponse {
                success: true,
                message: None,
                appended_rows: Some(valid as u32),
            })),
            import_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            last_upload: Mutex::new(None),
            silent: AtomicBool::new(false),
        }
    }

    /// Backend that never answers.
    pub fn unreachable() -> Self {
        let mock = Self::new();
        mock.set_import(Err(ServiceError::Unreachable("connection refused".into())));
        mock.set_submit(Err(ServiceError::Unreachable("connection refused".into())));
        mock
    }

    /// Backend that accepts requests and never replies.
    pub fn silent() -> Self {
        let mock = Self::new();
        mock.set_silent(true);
        mock
    }

    /// While silent, calls are counted but never answered.
    pub fn set_silent(&self, silent: bool) {
        self.silent.store(silent, Ordering::SeqCst);
    }

    pub fn with_import(self, reply: ServiceResult<ImportResponse>) -> Self {
        self.set_import(reply);
        self
    }

    pub fn with_submit(self, reply: ServiceResult<SubmitResponse>) -> Self {
        self.set_submit(reply);
        self
    }

    pub fn set_import(&self, reply: ServiceResult<ImportResponse>) {
        *self.import_reply.lock().unwrap_or_else(|e| e.into_inner()) = reply;
    }

    pub fn set_submit(&self, reply: ServiceResult<SubmitResponse>) {
        *self.submit_reply.lock().unwrap_or_else(|e| e.into_inner()) = reply;
    }

    pub fn import_calls(&self) -> usize {
        self.import_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Total network calls made.
    pub fn calls(&self) -> usize {
        self.import_calls() + self.submit_calls()
    }

    pub fn last_upload(&self) -> Option<SelectedFile> {
        self.last_upload.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn wait_for_reply(&self) {
        if self.silent.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl ImportBackend for MockBackend {
    fn endpoint_url(&self, path: &str) -> String {
        format!("mock://backend/api{}", path)
    }

    async fn import(&self, file: &SelectedFile) -> ServiceResult<ImportResponse> {
        self.import_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_upload.lock().unwrap_or_else(|e| e.into_inner()) = Some(file.clone());
        self.wait_for_reply().await;
        self.import_reply.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn submit(&self) -> ServiceResult<SubmitResponse> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_reply().await;
        self.submit_reply.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
