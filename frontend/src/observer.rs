//! Observer interface between the controller and a presentation layer.
//!
//! The controller never renders anything itself. It reports phase changes,
//! previews and notifications here; a view decides how to show them.

use crate::preview::Preview;
use crate::types::{Affordances, Notification, Phase};

/// Receives workflow events from the controller.
pub trait WorkflowObserver {
    /// Phase changed; `affordances` is the new enabled set.
    fn phase_changed(&mut self, phase: Phase, affordances: Affordances);

    /// The platform file picker should be opened.
    fn file_requested(&mut self) {}

    /// An import was accepted and its preview should be shown.
    fn preview_ready(&mut self, preview: &Preview);

    /// The preview surface should be closed.
    fn preview_closed(&mut self) {}

    /// A dismissible message for the user.
    fn notify(&mut self, notification: Notification);

    /// Submit succeeded; the acknowledgement stays up until dismissed.
    fn submitted(&mut self, _acknowledgement: &str) {}

    /// The file-selection control was cleared, the same file may be picked again.
    fn file_selection_cleared(&mut self) {}

    /// The whole view should be reset, including any pending server-side import.
    fn reset_requested(&mut self) {}
}

/// One recorded observer call.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowEvent {
    PhaseChanged(Phase, Affordances),
    FileRequested,
    PreviewReady(Preview),
    PreviewClosed,
    Notified(Notification),
    Submitted(String),
    FileSelectionCleared,
    ResetRequested,
}

/// Observer that keeps every event, for tests and headless use.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<WorkflowEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, oldest first.
    pub fn notifications(&self) -> Vec<&Notification> {
        self.events
            .iter()
            .filter_map(|e| match e {
                WorkflowEvent::Notified(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications().into_iter().last()
    }

    /// Most recently reported affordances.
    pub fn last_affordances(&self) -> Option<Affordances> {
        self.events.iter().rev().find_map(|e| match e {
            WorkflowEvent::PhaseChanged(_, a) => Some(*a),
            _ => None,
        })
    }

    pub fn last_preview(&self) -> Option<&Preview> {
        self.events.iter().rev().find_map(|e| match e {
            WorkflowEvent::PreviewReady(p) => Some(p),
            _ => None,
        })
    }

    /// Phases in the order they were entered.
    pub fn phases(&self) -> Vec<Phase> {
        self.events
            .iter()
            .filter_map(|e| match e {
                WorkflowEvent::PhaseChanged(p, _) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn saw(&self, event: &WorkflowEvent) -> bool {
        self.events.contains(event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl WorkflowObserver for RecordingObserver {
    fn phase_changed(&mut self, phase: Phase, affordances: Affordances) {
        self.events.push(WorkflowEvent::PhaseChanged(phase, affordances));
    }

    fn file_requested(&mut self) {
        self.events.push(WorkflowEvent::FileRequested);
    }

    fn preview_ready(&mut self, preview: &Preview) {
        self.events.push(WorkflowEvent::PreviewReady(preview.clone()));
    }

    fn preview_closed(&mut self) {
        self.events.push(WorkflowEvent::PreviewClosed);
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push(WorkflowEvent::Notified(notification));
    }

    fn submitted(&mut self, acknowledgement: &str) {
        self.events.push(WorkflowEvent::Submitted(acknowledgement.to_string()));
    }

    fn file_selection_cleared(&mut self) {
        self.events.push(WorkflowEvent::FileSelectionCleared);
    }

    fn reset_requested(&mut self) {
        self.events.push(WorkflowEvent::ResetRequested);
    }
}
