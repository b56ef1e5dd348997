//! Preview rendering for an accepted import.
//!
//! Pure derivation: nothing here touches the DOM, the session or the network.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::session::ImportSession;
use crate::types::MrlRecordSummary;

/// Shown when the backend accepted the file but kept no record.
pub const NO_VALID_DATA: &str = "No valid data found in the file.";

/// Everything the preview surface displays.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub file_name: String,
    /// Pretty-printed file text
    pub pretty_xml: String,
    pub valid_records_count: usize,
    pub invalid_records_count: usize,
    /// Errors in the order the backend sent them
    pub errors: Vec<String>,
    pub records: Vec<MrlRecordSummary>,
    /// The confirm affordance is enabled only with valid records
    pub confirm_enabled: bool,
    pub warning: Option<String>,
}

/// Derive the preview from the session.
pub fn render_preview(session: &ImportSession) -> Preview {
    let validation = &session.validation;
    let confirm_enabled = validation.has_valid_records();

    Preview {
        file_name: session.file_name.clone(),
        pretty_xml: pretty_print_xml(&session.raw_file_text),
        valid_records_count: validation.valid_records_count,
        invalid_records_count: validation.invalid_records_count,
        errors: validation.errors.clone(),
        records: session
            .valid_records
            .iter()
            .filter_map(MrlRecordSummary::from_value)
            .collect(),
        confirm_enabled,
        warning: (!confirm_enabled).then(|| NO_VALID_DATA.to_string()),
    }
}

/// Re-indent an XML document with two spaces.
///
/// Returns the input unchanged when it does not parse.
pub fn pretty_print_xml(raw: &str) -> String {
    match reindent(raw) {
        Ok(pretty) => pretty,
        Err(e) => {
            log::debug!("Preview shows raw text, XML not re-indented: {}", e);
            raw.to_string()
        }
    }
}

fn reindent(raw: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event).map_err(|e| e.to_string())?,
            Err(e) => {
                return Err(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            }
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

impl Preview {
    /// One-line count summary for headers.
    pub fn summary(&self) -> String {
        format!(
            "{} valid • {} invalid",
            self.valid_records_count, self.invalid_records_count
        )
    }
}
