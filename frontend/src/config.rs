//! Application configuration.
//!
//! Centralized configuration for the MRL cockpit front-end.
//! Everything is a compile-time constant; the page has no settings.

/// Backend API base URL.
///
/// The MRL cockpit backend that validates XML and appends to the Excel store.
pub const API_BASE_URL: &str = "http://localhost:8080/api";

/// Path of the import (upload + validation) endpoint.
pub const IMPORT_PATH: &str = "/import";

/// Path of the submit endpoint.
pub const SUBMIT_PATH: &str = "/submit";

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Accepted filename suffix (case-sensitive).
pub const XML_EXTENSION: &str = ".xml";

/// Acknowledgement shown after a submit when the backend sends no message.
pub const DEFAULT_SUBMIT_MESSAGE: &str = "Submitted successfully";

/// Maximum notifications kept on the page.
pub const MAX_NOTIFICATIONS: usize = 100;

/// Full URL of an endpoint below a base URL.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
