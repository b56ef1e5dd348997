use leptos::*;

use crate::types::Phase;
use crate::API_BASE_URL;

#[component]
pub fn Header(phase: RwSignal<Phase>) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">"MRL COCKPIT"</a>
                <span class="badge">{API_BASE_URL}</span>
            </div>
            <div class="header-right">
                <div class="phase-status" class:busy=move || phase.get().is_busy()>
                    <span class="phase-dot" class:busy=move || phase.get().is_busy()></span>
                    <span>{move || phase.get().to_string()}</span>
                </div>
            </div>
        </header>
    }
}
