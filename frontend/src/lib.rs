//! MRL Cockpit - import/submit front-end
//!
//! Browser page that uploads an XML file of MRL records to the cockpit
//! backend, previews the validation result and, once confirmed, asks the
//! backend to append the accepted records to its Excel store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   events    ┌────────────────────┐   HTTP    ┌──────────────┐
//! │  components  │────────────▶│ WorkflowController │──────────▶│   backend    │
//! │  (signals)   │◀────────────│  (owns session)    │◀──────────│ /api/import  │
//! └──────────────┘  observer   └────────────────────┘   JSON    │ /api/submit  │
//!                                                              └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - backend URL and endpoint constants
//! - [`types`] - phases, notifications, API responses
//! - [`error`] - service and workflow errors
//! - [`session`] - selected file and pending import
//! - [`preview`] - preview rendering
//! - [`observer`] - controller → presentation interface
//! - [`controller`] - the workflow state machine
//! - [`services`] - backend communication
//! - [`components`] - Leptos page components

use futures::lock::Mutex;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use std::rc::Rc;

pub mod config;
pub mod types;
pub mod error;
pub mod session;
pub mod preview;
pub mod observer;
pub mod controller;
pub mod services;
pub mod components;

// Configuration
pub use config::*;

// Types
pub use types::{
    // Workflow
    Affordances, Phase,
    // Notifications
    Notification, NotificationLevel,
    // API
    ImportResponse, SubmitResponse, ValidationSummary,
    // Records
    MrlRecordSummary,
};

// Errors
pub use error::{ServiceError, ServiceResult, WorkflowError, WorkflowResult};

// Workflow
pub use controller::WorkflowController;
pub use observer::{RecordingObserver, WorkflowEvent, WorkflowObserver};
pub use preview::{pretty_print_xml, render_preview, Preview};
pub use session::{ImportSession, SelectedFile};

// Services
pub use services::*;

// Components
pub use components::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="MRL Cockpit"/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let signals = WorkflowSignals::new();
    let controller: SharedController = Rc::new(Mutex::new(WorkflowController::new(
        HttpBackend::default(),
        signals,
    )));

    view! {
        <Header phase=signals.phase/>

        <div class="container">
            <ImportSection controller=controller.clone() signals=signals/>
            <SubmitSection controller=controller.clone() signals=signals/>
            <PreviewModal controller=controller signals=signals/>
            <NotificationsPanel signals=signals/>
        </div>
    }
}
