//! Backend services.
//!
//! # Services
//!
//! - [`backend`] - the [`ImportBackend`] seam and its HTTP implementation
//! - [`mock`] - scripted backend for tests

pub mod backend;
pub mod mock;

pub use backend::*;
pub use mock::*;
