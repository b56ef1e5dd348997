//! Dismissible notification list.
//!
//! Shows every workflow notification with its timestamp, newest last,
//! and scrolls to the bottom when one arrives.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::WorkflowSignals;
use crate::types::NotificationLevel;

/// Request animation frame helper for smooth scrolling
fn request_animation_frame(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(f);
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}

fn level_class(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Info => "log-info",
        NotificationLevel::Success => "log-success",
        NotificationLevel::Warning => "log-warning",
        NotificationLevel::Error => "log-error",
    }
}

#[component]
pub fn NotificationsPanel(signals: WorkflowSignals) -> impl IntoView {
    let container = create_node_ref::<leptos::html::Div>();

    // Auto-scroll to bottom when notifications change
    create_effect(move |_| {
        let _ = signals.notifications.get();
        if let Some(container) = container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"🔔 Notifications"</span>
                <button class="logs-clear" on:click=move |_| signals.clear_notifications()>
                    "Clear"
                </button>
            </div>
            <div class="logs-content" node_ref=container>
                <For
                    each=move || signals.notifications.get()
                    key=|shown| shown.id
                    children=move |shown| {
                        let id = shown.id;
                        let n = shown.notification;
                        view! {
                            <div class=format!("log-entry {}", level_class(n.level))>
                                <span class="log-time">"[" {n.timestamp} "] "</span>
                                {n.level.emoji()} " " <strong>{n.title}</strong> ": " {n.message}
                                <button class="log-dismiss" on:click=move |_| signals.dismiss(id)>"×"</button>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
