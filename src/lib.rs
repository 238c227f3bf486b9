//! Step-gated booking wizard
//!
//! Four-step travel booking form: each step's values are validated against a
//! per-step schema, merged into a cumulative record on success, and the record
//! is handed to a [`submission::SubmissionSink`] after the last step.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod messaging;
pub mod schema;
pub mod submission;
pub mod validator;
pub mod wizard;

pub use error::{AppResult, WizardError};
pub use wizard::{BookingStep, BookingWizard, NavigationResult, WizardPhase};
