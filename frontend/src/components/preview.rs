//! Preview popup: file contents, validation counts, errors, confirm/cancel.

use leptos::*;

use super::{SharedController, WorkflowSignals};
use crate::preview::Preview;

#[component]
pub fn PreviewModal(controller: SharedController, signals: WorkflowSignals) -> impl IntoView {
    let on_cancel = {
        let controller = controller.clone();
        move |_| match controller.try_lock() {
            Some(mut c) => {
                c.cancel_preview();
            }
            None => signals.busy(),
        }
    };

    let on_confirm = move |_| match controller.try_lock() {
        Some(mut c) => {
            c.confirm_preview();
        }
        None => signals.busy(),
    };

    let preview = move || signals.preview.get();

    view! {
        <Show
            when=move || signals.affordances.get().preview_open && preview().is_some()
            fallback=|| view! { }
        >
            <div class="modal-backdrop">
                <div class="preview-section show" id="previewPopup">
                    <div class="preview-header">
                        <div class="preview-title">
                            "📋 " {move || preview().map(|p| p.file_name).unwrap_or_default()}
                        </div>
                        <button class="btn btn-secondary" id="cancelBtn" on:click=on_cancel.clone()>"Cancel"</button>
                    </div>

                    <pre class="xml-preview">{move || preview().map(|p| p.pretty_xml).unwrap_or_default()}</pre>

                    {move || preview().map(|p| view! { <ValidationDetails preview=p/> })}

                    <div class="preview-footer">
                        <button
                            class="btn btn-primary"
                            id="confirmBtn"
                            on:click=on_confirm.clone()
                            disabled=move || !signals.affordances.get().confirm
                        >
                            "Confirm"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn ValidationDetails(preview: Preview) -> impl IntoView {
    let Preview {
        valid_records_count,
        invalid_records_count,
        errors,
        records,
        warning,
        ..
    } = preview;
    let has_errors = !errors.is_empty();
    let lines: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    let has_records = !lines.is_empty();

    view! {
        <div class="validation">
            <div class="validation-counts">
                <span class="count-valid">"Valid records: " <strong>{valid_records_count}</strong></span>
                " • "
                <span class="count-invalid">"Invalid records: " <strong>{invalid_records_count}</strong></span>
            </div>

            <Show when=move || has_errors fallback=|| view! { }>
                <div class="validation-errors">
                    <div class="validation-subtitle">"Errors:"</div>
                    <ul>
                        {errors.iter().map(|e| view! { <li>{e.clone()}</li> }).collect_view()}
                    </ul>
                </div>
            </Show>

            <Show when=move || has_records fallback=|| view! { }>
                <div class="preview-list">
                    {lines.iter().map(|l| view! { <div class="preview-item">{l.clone()}</div> }).collect_view()}
                </div>
            </Show>

            {warning.map(|w| view! { <div class="warning-message">"⚠️ " {w}</div> })}
        </div>
    }
}
