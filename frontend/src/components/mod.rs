//! Page components.
//!
//! # Components
//! - [`Header`] - title bar with the workflow phase
//! - [`ImportSection`] - Import button and hidden file input
//! - [`PreviewModal`] - XML preview with confirm/cancel
//! - [`SubmitSection`] - Submit button and success acknowledgement
//! - [`NotificationsPanel`] - dismissible notification list
//! - [`WorkflowSignals`] - signals fed by the controller

mod header;
mod notifications;
mod preview;
mod signals;
mod submit;
mod upload;

pub use header::*;
pub use notifications::*;
pub use preview::*;
pub use signals::*;
pub use submit::*;
pub use upload::*;
