//! Common types used across the front-end.
//!
//! # Categories
//!
//! - **Workflow Types** - phase and enabled affordances
//! - **Notification Types** - user-visible, dismissible messages
//! - **API Types** - backend request/response structures
//! - **Record Types** - display summaries of accepted records

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Workflow Types
// =============================================================================

/// Position of the controller in the import/submit workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing pending.
    Idle,
    /// Upload to the import endpoint in flight.
    Importing,
    /// Import accepted, preview available, submit possible.
    PreviewReady,
    /// Submit request in flight.
    Submitting,
    /// Submit succeeded, waiting for the user to dismiss the acknowledgement.
    Submitted,
}

impl Phase {
    /// Whether a network request is outstanding in this phase.
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Importing | Phase::Submitting)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Importing => "importing",
            Phase::PreviewReady => "preview ready",
            Phase::Submitting => "submitting",
            Phase::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

/// Which UI affordances are currently enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Affordances {
    /// Import button / file picker.
    pub import: bool,
    /// Confirm button on the preview surface.
    pub confirm: bool,
    /// Submit button.
    pub submit: bool,
    /// Preview surface is shown.
    pub preview_open: bool,
}

// =============================================================================
// Notification Types
// =============================================================================

/// Notification severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Get emoji prefix for display.
    pub fn emoji(&self) -> &'static str {
        match self {
            NotificationLevel::Info => "ℹ️",
            NotificationLevel::Success => "✅",
            NotificationLevel::Warning => "⚠️",
            NotificationLevel::Error => "❌",
        }
    }
}

/// A dismissible message shown to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity level
    pub level: NotificationLevel,
    /// Short heading
    pub title: String,
    /// Message body
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, message)
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Response from the backend import endpoint.
///
/// `validRecords` is kept as raw JSON; the front-end only summarizes it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportResponse {
    /// Whether the whole file validated
    pub valid: bool,
    /// Records the backend parsed
    pub total_records: Option<usize>,
    /// Records accepted
    pub valid_records_count: usize,
    /// Records rejected
    pub invalid_records_count: usize,
    /// One message per problem, in backend order
    #[serde(deserialize_with = "null_as_empty")]
    pub errors: Vec<String>,
    /// Accepted records
    #[serde(deserialize_with = "null_as_empty")]
    pub valid_records: Vec<Value>,
}

impl ImportResponse {
    /// Counts and errors of this response.
    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            total_records: self.total_records,
            valid_records_count: self.valid_records_count,
            invalid_records_count: self.invalid_records_count,
            errors: self.errors.clone(),
        }
    }
}

/// Response from the backend submit endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Rows appended to the store
    #[serde(default)]
    pub appended_rows: Option<u32>,
}

/// Outcome of the last import call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub total_records: Option<usize>,
    pub valid_records_count: usize,
    pub invalid_records_count: usize,
    pub errors: Vec<String>,
}

impl ValidationSummary {
    /// Valid and invalid counts add up to the parsed total (when reported).
    pub fn is_consistent(&self) -> bool {
        match self.total_records {
            Some(total) => self.valid_records_count + self.invalid_records_count == total,
            None => true,
        }
    }

    pub fn has_valid_records(&self) -> bool {
        self.valid_records_count > 0
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Record Types
// =============================================================================

/// Summary of one accepted MRL record for the preview list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MrlRecordSummary {
    pub material_id: String,
    pub plant: String,
    pub mrl_number: String,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub status: Option<String>,
}

impl MrlRecordSummary {
    /// Build a summary from a backend record; `None` without a material id.
    pub fn from_value(record: &Value) -> Option<Self> {
        let text = |key: &str| -> Option<String> {
            match record.get(key)? {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                // Dates serialized as [yyyy, mm, dd]
                Value::Array(parts) => Some(
                    parts
                        .iter()
                        .map(|p| match p.as_u64() {
                            Some(n) => format!("{:02}", n),
                            None => p.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join("-"),
                ),
                other => Some(other.to_string()),
            }
        };

        Some(Self {
            material_id: text("materialId")?,
            plant: text("plant").unwrap_or_default(),
            mrl_number: text("mrlNumber").unwrap_or_default(),
            valid_from: text("validFrom"),
            valid_to: text("validTo"),
            status: text("status"),
        })
    }
}

impl fmt::Display for MrlRecordSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} • Plant: {} • MRL: {}", self.material_id, self.plant, self.mrl_number)?;
        if self.valid_from.is_some() || self.valid_to.is_some() {
            write!(
                f,
                " • {} → {}",
                self.valid_from.as_deref().unwrap_or("?"),
                self.valid_to.as_deref().unwrap_or("?")
            )?;
        }
        if let Some(status) = &self.status {
            write!(f, " • {}", status)?;
        }
        Ok(())
    }
}
