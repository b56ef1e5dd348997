//! Error types for the import/submit workflow.
//!
//! - [`ServiceError`] - failures talking to the backend
//! - [`WorkflowError`] - failures surfaced by the workflow controller
//!
//! Service errors are translated into workflow errors by the controller,
//! because the same transport failure means different things depending on
//! which phase issued the request.

use thiserror::Error;

use crate::types::Notification;

// =============================================================================
// Backend Service Errors
// =============================================================================

/// Errors from the backend client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No response reached the client.
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-success status.
    #[error("Server responded with status: {status}{}", detail(.message))]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built (form data, blob).
    #[error("Failed to build request: {0}")]
    Request(String),
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(" ({})", m),
        None => String::new(),
    }
}

// =============================================================================
// Workflow Errors
// =============================================================================

/// Errors surfaced by the workflow controller.
///
/// Every variant is recovered inside the controller before it is returned:
/// the phase is already back to `Idle` or `PreviewReady` and a notification
/// has been emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Selected file does not end in `.xml`.
    #[error("'{file_name}' is not an XML file. Please select an XML file.")]
    InvalidFileType { file_name: String },

    /// Import endpoint rejected the upload or returned garbage.
    #[error("Import failed: {0}")]
    ImportRequestFailed(String),

    /// No response from the backend.
    #[error("Cannot connect to backend server at {url}. Please make sure the backend server is running. ({reason})")]
    BackendUnreachable { url: String, reason: String },

    /// Submit attempted without an accepted import.
    #[error("No data to submit. Please import a file first.")]
    NothingToSubmit,

    /// Submit endpoint refused the records.
    #[error("Failed to submit data: {0}")]
    SubmitRejected(String),

    /// The page triggered an action while a request is still outstanding.
    #[error("A request is already in progress")]
    RequestInFlight,
}

impl WorkflowError {
    /// User-visible notification for this failure.
    pub fn notification(&self) -> Notification {
        let title = match self {
            WorkflowError::InvalidFileType { .. } => "Invalid file type",
            WorkflowError::ImportRequestFailed(_) => "Import failed",
            WorkflowError::BackendUnreachable { .. } => "Backend unreachable",
            WorkflowError::NothingToSubmit => "Nothing to submit",
            WorkflowError::SubmitRejected(_) => "Submit failed",
            WorkflowError::RequestInFlight => "Busy",
        };
        match self {
            WorkflowError::NothingToSubmit | WorkflowError::RequestInFlight => {
                Notification::warning(title, self.to_string())
            }
            _ => Notification::error(title, self.to_string()),
        }
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Result type for backend calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
