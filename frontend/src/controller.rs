//! Import/submit workflow controller.
//!
//! ```text
//! Idle ──select──▶ Importing ──ok──▶ PreviewReady ──submit──▶ Submitting ──ok──▶ Submitted
//!  ▲                  │                 │    ▲                    │                 │
//!  │                  └──fail──▶ Idle   │    └───────fail─────────┘                 │
//!  ├─────────────────────cancel─────────┘                                           │
//!  └──────────────────────────────────────dismiss───────────────────────────────────┘
//! ```
//!
//! Every transition goes through `set_state`, which
//! reports the new phase and affordances to the observer. Failures are
//! recovered here: by the time an operation returns `Err`, the phase is
//! already `Idle` or `PreviewReady` and the user has been notified.
//!
//! A request future dropped before the backend answers puts the controller
//! back where the request started (`Idle` for an import, `PreviewReady` with
//! the same session for a submit).

use crate::config::{DEFAULT_SUBMIT_MESSAGE, IMPORT_PATH, SUBMIT_PATH};
use crate::error::{ServiceError, WorkflowError, WorkflowResult};
use crate::observer::WorkflowObserver;
use crate::preview::{render_preview, Preview};
use crate::services::ImportBackend;
use crate::session::{ImportSession, SelectedFile};
use crate::types::{Affordances, Notification, Phase};

enum State {
    Idle,
    Importing,
    PreviewReady {
        session: ImportSession,
        preview_open: bool,
    },
    Submitting {
        session: ImportSession,
        preview_open: bool,
    },
    Submitted {
        session: ImportSession,
        message: String,
    },
}

impl State {
    fn phase(&self) -> Phase {
        match self {
            State::Idle => Phase::Idle,
            State::Importing => Phase::Importing,
            State::PreviewReady { .. } => Phase::PreviewReady,
            State::Submitting { .. } => Phase::Submitting,
            State::Submitted { .. } => Phase::Submitted,
        }
    }

    fn affordances(&self) -> Affordances {
        match self {
            State::Idle | State::Submitted { .. } => Affordances {
                import: true,
                ..Affordances::default()
            },
            State::Importing | State::Submitting { .. } => Affordances::default(),
            State::PreviewReady {
                session,
                preview_open,
            } => Affordances {
                import: true,
                confirm: *preview_open && !session.confirmed && session.can_submit(),
                submit: session.can_submit(),
                preview_open: *preview_open,
            },
        }
    }

    /// State to fall back to when the outstanding request is abandoned.
    fn abandon(self) -> State {
        match self {
            State::Importing => State::Idle,
            State::Submitting {
                session,
                preview_open,
            } => State::PreviewReady {
                session,
                preview_open,
            },
            other => other,
        }
    }
}

/// Restores the pre-request phase unless the request completed.
struct InFlight<'a, O: WorkflowObserver> {
    state: &'a mut State,
    observer: &'a mut O,
    armed: bool,
}

impl<'a, O: WorkflowObserver> InFlight<'a, O> {
    fn new(state: &'a mut State, observer: &'a mut O) -> Self {
        Self {
            state,
            observer,
            armed: true,
        }
    }

    fn complete(mut self) {
        self.armed = false;
    }
}

impl<O: WorkflowObserver> Drop for InFlight<'_, O> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let from = self.state.phase();
        let abandoned = std::mem::replace(self.state, State::Idle);
        *self.state = abandoned.abandon();
        let phase = self.state.phase();
        log::warn!("⚠️ Request dropped before the backend answered, phase {} → {}", from, phase);

        self.observer.phase_changed(phase, self.state.affordances());
        if phase == Phase::Idle {
            self.observer.file_selection_cleared();
        }
        self.observer.notify(Notification::warning(
            "Request abandoned",
            "The request was abandoned before the backend answered. Please try again.",
        ));
    }
}

/// Owns the import session and drives it through the workflow phases.
///
/// Operations take `&mut self` across their single network await, so at most
/// one request is ever outstanding.
pub struct WorkflowController<B, O> {
    backend: B,
    observer: O,
    state: State,
}

impl<B: ImportBackend, O: WorkflowObserver> WorkflowController<B, O> {
    pub fn new(backend: B, observer: O) -> Self {
        Self {
            backend,
            observer,
            state: State::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Currently enabled affordances.
    pub fn affordances(&self) -> Affordances {
        self.state.affordances()
    }

    /// The pending import, if any.
    pub fn session(&self) -> Option<&ImportSession> {
        match &self.state {
            State::PreviewReady { session, .. }
            | State::Submitting { session, .. }
            | State::Submitted { session, .. } => Some(session),
            _ => None,
        }
    }

    /// Success acknowledgement waiting to be dismissed.
    pub fn acknowledgement(&self) -> Option<&str> {
        match &self.state {
            State::Submitted { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Ask the presentation layer to open the file picker.
    pub fn request_file(&mut self) {
        log::debug!("📂 File picker requested");
        self.observer.file_requested();
    }

    /// Validate the extension and upload the file to the import endpoint.
    pub async fn on_file_selected(&mut self, file: SelectedFile) -> WorkflowResult<()> {
        if !file.has_xml_extension() {
            self.observer.file_selection_cleared();
            return Err(self.report(WorkflowError::InvalidFileType {
                file_name: file.name,
            }));
        }

        if matches!(self.state, State::Submitted { .. }) {
            // Picking a new file dismisses the previous acknowledgement
            self.set_state(State::Idle);
        }

        log::info!("📤 Importing {}", file.name);
        self.set_state(State::Importing);

        let in_flight = InFlight::new(&mut self.state, &mut self.observer);
        let reply = self.backend.import(&file).await;
        in_flight.complete();

        match reply {
            Ok(response) => {
                let session = ImportSession::new(&file, response);
                let validation = &session.validation;
                if !validation.is_consistent() {
                    log::warn!(
                        "⚠️ Backend counts do not add up: {} valid + {} invalid != {:?} total",
                        validation.valid_records_count,
                        validation.invalid_records_count,
                        validation.total_records
                    );
                }
                log::info!(
                    "✅ Import {} accepted: {} valid, {} invalid",
                    session.id,
                    validation.valid_records_count,
                    validation.invalid_records_count
                );

                let preview = render_preview(&session);
                self.set_state(State::PreviewReady {
                    session,
                    preview_open: true,
                });
                self.observer.preview_ready(&preview);

                let notification = match &preview.warning {
                    Some(warning) => Notification::warning("Nothing to import", warning.clone()),
                    None => Notification::success(
                        "Imported successfully",
                        format!("{} valid record(s) ready for review", preview.valid_records_count),
                    ),
                };
                self.observer.notify(notification);
                Ok(())
            }
            Err(e) => {
                let err = match e {
                    ServiceError::Unreachable(reason) => WorkflowError::BackendUnreachable {
                        url: self.backend.endpoint_url(IMPORT_PATH),
                        reason,
                    },
                    other => WorkflowError::ImportRequestFailed(other.to_string()),
                };
                self.set_state(State::Idle);
                self.observer.file_selection_cleared();
                Err(self.report(err))
            }
        }
    }

    /// Preview of the pending import.
    pub fn render_preview(&self) -> Option<Preview> {
        match &self.state {
            State::PreviewReady { session, .. } => Some(render_preview(session)),
            _ => None,
        }
    }

    /// Accept the preview. No-op unless a preview with valid records is pending.
    ///
    /// Makes no network call: the backend already holds the parsed records.
    pub fn confirm_preview(&mut self) -> bool {
        let phase = self.phase();
        let count = match &mut self.state {
            State::PreviewReady {
                session,
                preview_open,
            } if session.can_submit() && !session.confirmed => {
                session.confirmed = true;
                *preview_open = false;
                session.validation.valid_records_count
            }
            _ => {
                log::debug!("Confirm ignored in phase {}", phase);
                return false;
            }
        };

        log::info!("👍 Preview confirmed, {} record(s) pending submit", count);
        self.observer.preview_closed();
        self.observer.file_selection_cleared();
        self.observer.notify(Notification::success(
            "Data imported",
            format!("{} record(s) ready to submit", count),
        ));
        self.emit_phase();
        true
    }

    /// Drop the pending import and ask for a full view reset.
    pub fn cancel_preview(&mut self) -> bool {
        if !matches!(self.state, State::PreviewReady { .. }) {
            log::debug!("Cancel ignored in phase {}", self.phase());
            return false;
        }

        log::info!("🚫 Import cancelled");
        self.observer.preview_closed();
        self.set_state(State::Idle);
        self.observer.file_selection_cleared();
        self.observer.reset_requested();
        self.observer.notify(Notification::info("Import cancelled", "The pending import was discarded."));
        true
    }

    /// Submit the records accepted by the last import.
    ///
    /// Returns the acknowledgement text on success.
    pub async fn submit_data(&mut self) -> WorkflowResult<String> {
        let (session, preview_open) = match std::mem::replace(&mut self.state, State::Idle) {
            State::PreviewReady {
                session,
                preview_open,
            } if session.can_submit() => (session, preview_open),
            other => {
                self.state = other;
                return Err(self.report(WorkflowError::NothingToSubmit));
            }
        };

        log::info!(
            "📤 Submitting {} record(s) from import {}",
            session.validation.valid_records_count,
            session.id
        );
        self.set_state(State::Submitting {
            session,
            preview_open,
        });

        let in_flight = InFlight::new(&mut self.state, &mut self.observer);
        let reply = self.backend.submit().await;
        in_flight.complete();

        let State::Submitting {
            session,
            preview_open,
        } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return Err(self.report(WorkflowError::NothingToSubmit));
        };

        let failure = match reply {
            Ok(response) if response.success => {
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SUBMIT_MESSAGE.to_string());
                log::info!("✅ Submitted: {}", message);
                self.set_state(State::Submitted {
                    session,
                    message: message.clone(),
                });
                self.observer.submitted(&message);
                self.observer.notify(Notification::success("Submitted", message.clone()));
                return Ok(message);
            }
            Ok(response) => WorkflowError::SubmitRejected(
                response.message.unwrap_or_else(|| "Unknown error".to_string()),
            ),
            Err(ServiceError::Unreachable(reason)) => WorkflowError::BackendUnreachable {
                url: self.backend.endpoint_url(SUBMIT_PATH),
                reason,
            },
            Err(ServiceError::Status { status, message }) => WorkflowError::SubmitRejected(
                message.unwrap_or_else(|| format!("Server responded with status: {}", status)),
            ),
            Err(other) => WorkflowError::SubmitRejected(other.to_string()),
        };

        self.set_state(State::PreviewReady {
            session,
            preview_open,
        });
        Err(self.report(failure))
    }

    /// Dismiss the success acknowledgement and discard the session.
    pub fn dismiss_acknowledgement(&mut self) -> bool {
        if !matches!(self.state, State::Submitted { .. }) {
            return false;
        }
        self.set_state(State::Idle);
        true
    }

    fn set_state(&mut self, state: State) {
        let from = self.phase();
        self.state = state;
        log::debug!("Phase {} → {}", from, self.phase());
        self.emit_phase();
    }

    fn emit_phase(&mut self) {
        let phase = self.phase();
        let affordances = self.affordances();
        self.observer.phase_changed(phase, affordances);
    }

    fn report(&mut self, err: WorkflowError) -> WorkflowError {
        match &err {
            WorkflowError::NothingToSubmit | WorkflowError::RequestInFlight => {
                log::warn!("⚠️ {}", err)
            }
            _ => log::error!("❌ {}", err),
        }
        self.observer.notify(err.notification());
        err
    }
}
