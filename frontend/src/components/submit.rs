use leptos::*;

use super::{SharedController, WorkflowSignals};
use crate::types::Phase;

/// Submit button and the success acknowledgement popup.
#[component]
pub fn SubmitSection(controller: SharedController, signals: WorkflowSignals) -> impl IntoView {
    let on_submit = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            spawn_local(async move {
                let Some(mut c) = controller.try_lock() else {
                    signals.busy();
                    return;
                };
                if let Err(e) = c.submit_data().await {
                    log::debug!("Submit ended with: {}", e);
                }
            });
        }
    };

    let on_dismiss = move |_| match controller.try_lock() {
        Some(mut c) => {
            c.dismiss_acknowledgement();
        }
        None => signals.busy(),
    };

    let pending = move || {
        signals
            .preview
            .get()
            .filter(|_| signals.affordances.get().submit)
            .map(|p| format!("{} • {}", p.file_name, p.summary()))
    };

    view! {
        <div class="submit-section">
            <div class="submit-pending">
                {move || pending().unwrap_or_else(|| "No data imported yet".to_string())}
            </div>
            <button
                class="btn btn-primary"
                id="submitBtn"
                on:click=on_submit
                disabled=move || !signals.affordances.get().submit
            >
                {move || if signals.phase.get() == Phase::Submitting { "Submitting..." } else { "Submit Data" }}
            </button>
        </div>

        <Show
            when=move || signals.acknowledgement.get().is_some()
            fallback=|| view! { }
        >
            <div class="modal-backdrop">
                <div class="acknowledgement" id="successPopup">
                    <div class="acknowledgement-title">"✅ Submitted"</div>
                    <div class="acknowledgement-message">
                        {move || signals.acknowledgement.get().unwrap_or_default()}
                    </div>
                    <button class="btn btn-primary" id="dismissBtn" on:click=on_dismiss.clone()>"OK"</button>
                </div>
            </div>
        </Show>
    }
}
