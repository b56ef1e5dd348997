//! Reactive state shared by the page components.
//!
//! [`WorkflowSignals`] is the controller's observer: every workflow event
//! lands in a signal, and the components only read signals.

use futures::lock::Mutex;
use leptos::*;
use std::rc::Rc;

use crate::config::MAX_NOTIFICATIONS;
use crate::controller::WorkflowController;
use crate::error::WorkflowError;
use crate::observer::WorkflowObserver;
use crate::preview::Preview;
use crate::services::HttpBackend;
use crate::types::{Affordances, Notification, Phase};

/// The page's controller. Locked for the whole duration of a request.
pub type SharedController = Rc<Mutex<WorkflowController<HttpBackend, WorkflowSignals>>>;

/// A notification on screen, keyed for dismissal.
#[derive(Clone, Debug, PartialEq)]
pub struct ShownNotification {
    pub id: usize,
    pub notification: Notification,
}

#[derive(Clone, Copy)]
pub struct WorkflowSignals {
    pub phase: RwSignal<Phase>,
    pub affordances: RwSignal<Affordances>,
    /// Last preview; visibility follows `affordances.preview_open`
    pub preview: RwSignal<Option<Preview>>,
    pub acknowledgement: RwSignal<Option<String>>,
    pub notifications: RwSignal<Vec<ShownNotification>>,
    /// Hidden `<input type="file">`
    pub file_input: NodeRef<html::Input>,
    next_id: StoredValue<usize>,
}

impl WorkflowSignals {
    pub fn new() -> Self {
        Self {
            phase: create_rw_signal(Phase::Idle),
            affordances: create_rw_signal(Affordances {
                import: true,
                ..Affordances::default()
            }),
            preview: create_rw_signal(None),
            acknowledgement: create_rw_signal(None),
            notifications: create_rw_signal(Vec::new()),
            file_input: create_node_ref::<html::Input>(),
            next_id: store_value(0),
        }
    }

    /// Tell the user the controller is still waiting on the backend.
    pub fn busy(mut self) {
        self.notify(WorkflowError::RequestInFlight.notification());
    }

    pub fn dismiss(self, id: usize) {
        self.notifications.update(|shown| shown.retain(|n| n.id != id));
    }

    pub fn clear_notifications(self) {
        self.notifications.set(Vec::new());
    }
}

impl Default for WorkflowSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowObserver for WorkflowSignals {
    fn phase_changed(&mut self, phase: Phase, affordances: Affordances) {
        self.phase.set(phase);
        self.affordances.set(affordances);
        if phase == Phase::Idle {
            self.preview.set(None);
            self.acknowledgement.set(None);
        }
    }

    fn file_requested(&mut self) {
        if let Some(input) = self.file_input.get_untracked() {
            input.click();
        }
    }

    fn preview_ready(&mut self, preview: &Preview) {
        self.preview.set(Some(preview.clone()));
    }

    fn notify(&mut self, notification: Notification) {
        log::info!("{} {}: {}", notification.level.emoji(), notification.title, notification.message);

        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.notifications.update(|shown| {
            shown.push(ShownNotification { id, notification });
            // Keep max notifications in memory
            if shown.len() > MAX_NOTIFICATIONS {
                shown.remove(0);
            }
        });
    }

    fn submitted(&mut self, acknowledgement: &str) {
        self.acknowledgement.set(Some(acknowledgement.to_string()));
    }

    fn file_selection_cleared(&mut self) {
        if let Some(input) = self.file_input.get_untracked() {
            input.set_value("");
        }
    }

    fn reset_requested(&mut self) {
        self.preview.set(None);
        self.acknowledgement.set(None);
        self.clear_notifications();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SUBMIT_MESSAGE;
    use crate::services::MockBackend;
    use crate::session::SelectedFile;
    use crate::types::NotificationLevel;

    const XML: &str = "<MRLData><Record><MaterialId>M1</MaterialId></Record></MRLData>";

    #[tokio::test]
    async fn test_signals_follow_the_workflow() {
        let runtime = create_runtime();
        let signals = WorkflowSignals::new();
        let backend = MockBackend::accepting(2, 1, vec!["row 3: bad date".into()]);
        let mut c = WorkflowController::new(backend, signals);

        c.on_file_selected(SelectedFile::new("records.xml", XML)).await.unwrap();
        assert_eq!(signals.phase.get_untracked(), Phase::PreviewReady);
        assert!(signals.affordances.get_untracked().confirm);
        let preview = signals.preview.get_untracked().unwrap();
        assert_eq!(preview.valid_records_count, 2);
        assert_eq!(preview.errors, vec!["row 3: bad date".to_string()]);

        assert!(c.confirm_preview());
        assert!(!signals.affordances.get_untracked().preview_open);
        assert!(signals.affordances.get_untracked().submit);
        // Preview content stays for the submit panel
        assert!(signals.preview.get_untracked().is_some());

        c.submit_data().await.unwrap();
        assert_eq!(signals.phase.get_untracked(), Phase::Submitted);
        assert_eq!(
            signals.acknowledgement.get_untracked().as_deref(),
            Some(DEFAULT_SUBMIT_MESSAGE)
        );

        assert!(c.dismiss_acknowledgement());
        assert!(signals.acknowledgement.get_untracked().is_none());
        assert!(signals.preview.get_untracked().is_none());
        assert!(signals.affordances.get_untracked().import);

        runtime.dispose();
    }

    #[tokio::test]
    async fn test_cancel_resets_the_view() {
        let runtime = create_runtime();
        let signals = WorkflowSignals::new();
        let mut c = WorkflowController::new(MockBackend::new(), signals);

        c.on_file_selected(SelectedFile::new("records.xml", XML)).await.unwrap();
        assert!(c.cancel_preview());

        assert_eq!(signals.phase.get_untracked(), Phase::Idle);
        assert!(signals.preview.get_untracked().is_none());
        // Only the cancellation notice survives the reset
        let shown = signals.notifications.get_untracked();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].notification.title, "Import cancelled");

        runtime.dispose();
    }

    #[test]
    fn test_notifications_are_capped_and_dismissible() {
        let runtime = create_runtime();
        let mut signals = WorkflowSignals::new();

        for i in 0..(MAX_NOTIFICATIONS + 5) {
            signals.notify(Notification::info("n", i.to_string()));
        }
        let shown = signals.notifications.get_untracked();
        assert_eq!(shown.len(), MAX_NOTIFICATIONS);
        assert_eq!(shown[0].notification.message, "5");

        let first = shown[0].id;
        signals.dismiss(first);
        let shown = signals.notifications.get_untracked();
        assert_eq!(shown.len(), MAX_NOTIFICATIONS - 1);
        assert!(shown.iter().all(|n| n.id != first));

        runtime.dispose();
    }

    #[test]
    fn test_busy_is_a_warning() {
        let runtime = create_runtime();
        let signals = WorkflowSignals::new();

        signals.busy();
        let shown = signals.notifications.get_untracked();
        assert_eq!(shown[0].notification.level, NotificationLevel::Warning);
        assert_eq!(shown[0].notification.message, "A request is already in progress");

        runtime.dispose();
    }
}
