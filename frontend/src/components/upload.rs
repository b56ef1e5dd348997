//! XML import: the Import button and its hidden file input.
//!
//! Reads the chosen file in the browser and hands it to the controller,
//! which checks the extension and uploads it.

use js_sys::Uint8Array;
use leptos::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

use super::{SharedController, WorkflowSignals};
use crate::observer::WorkflowObserver;
use crate::session::SelectedFile;
use crate::types::{Notification, Phase};

#[component]
pub fn ImportSection(controller: SharedController, signals: WorkflowSignals) -> impl IntoView {
    // Import button opens the file picker
    let on_import_click = {
        let controller = controller.clone();
        move |_| match controller.try_lock() {
            Some(mut c) => c.request_file(),
            None => signals.busy(),
        }
    };

    // File chosen
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let controller = controller.clone();
        spawn_local(async move {
            let selected = match read_file(&file).await {
                Ok(selected) => selected,
                Err(e) => {
                    let mut signals = signals;
                    signals.notify(Notification::error(
                        "Cannot read file",
                        format!("{}: {}", file.name(), e),
                    ));
                    signals.file_selection_cleared();
                    return;
                }
            };

            let Some(mut c) = controller.try_lock() else {
                signals.busy();
                return;
            };
            if let Err(e) = c.on_file_selected(selected).await {
                log::debug!("Import ended with: {}", e);
            }
        });
    };

    let file_input = signals.file_input;

    view! {
        <div class="upload-section" id="uploadZone">
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || if signals.phase.get() == Phase::Importing {
                    "⏳ Importing..."
                } else {
                    "Import an XML file of MRL records"
                }}
            </div>

            <input
                type="file"
                id="fileInput"
                accept=".xml"
                style="display:none"
                node_ref=file_input
                on:change=on_file_change
            />

            <button
                class="btn btn-primary"
                id="importBtn"
                on:click=on_import_click
                disabled=move || !signals.affordances.get().import
            >
                {move || if signals.phase.get() == Phase::Importing { "Importing..." } else { "Import Data" }}
            </button>
        </div>
    }
}

/// Read a browser file into memory.
async fn read_file(file: &File) -> Result<SelectedFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile::new(file.name(), bytes))
}
