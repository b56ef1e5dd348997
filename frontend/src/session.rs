//! The transient, single-pending-import session.
//!
//! A session exists only between a successful import and the moment it is
//! confirmed away, cancelled or submitted. It is owned by the controller
//! and never persisted.

use encoding_rs::Encoding;
use serde_json::Value;
use uuid::Uuid;

use crate::config::XML_EXTENSION;
use crate::types::{ImportResponse, ValidationSummary};

/// A file chosen through the file picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as shown to the user and sent to the backend
    pub name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Case-sensitive `.xml` suffix check.
    pub fn has_xml_extension(&self) -> bool {
        self.name.ends_with(XML_EXTENSION)
    }

    /// File contents as text.
    pub fn text(&self) -> String {
        decode_text(&self.bytes)
    }
}

/// State of an accepted import.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportSession {
    /// Local id for log correlation; never sent to the backend
    pub id: Uuid,
    pub file_name: String,
    /// Text of the uploaded file, read locally
    pub raw_file_text: String,
    pub validation: ValidationSummary,
    pub valid_records: Vec<Value>,
    /// Preview was confirmed by the user
    pub confirmed: bool,
}

impl ImportSession {
    pub fn new(file: &SelectedFile, response: ImportResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_name: file.name.clone(),
            raw_file_text: file.text(),
            validation: response.summary(),
            valid_records: response.valid_records,
            confirmed: false,
        }
    }

    /// Submit is only meaningful with at least one accepted record.
    pub fn can_submit(&self) -> bool {
        self.validation.has_valid_records()
    }
}

/// Charset of non-UTF-8 bytes, as guessed by chardet.
///
/// `None` when chardet names a charset `encoding_rs` does not know.
pub fn detect_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let (charset, confidence, _) = chardet::detect(bytes);
    log::debug!("Detected charset {} ({:.2})", charset, confidence);
    Encoding::for_label(charset.as_bytes())
}

/// Decode file bytes to text. UTF-8 first, then the detected charset.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.trim_start_matches('\u{feff}').to_string();
    }

    match detect_encoding(bytes) {
        Some(encoding) => encoding.decode(bytes).0.into_owned(),
        None => String::from_utf8_lossy(bytes).into_owned(),
    }
}
