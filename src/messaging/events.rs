//! Event types for the wizard
//!
//! Events represent things that have happened (past tense).
//! They are broadcast to all subscribers, typically the presentation layer.

use crate::validator::ValidationErrorSet;
use crate::wizard::steps::BookingStep;
use crate::wizard::transition::WizardPhase;

/// Wizard events
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// A field value was written to the store
    FieldChanged { field: String },

    /// A step's values failed validation
    ValidationFailed {
        step: BookingStep,
        errors: ValidationErrorSet,
    },

    /// A step's values were merged into the record
    StepAccepted { step: BookingStep },

    /// The active step switched (exit animation finished)
    StepChanged { from: BookingStep, to: BookingStep },

    /// Transition phase changed
    PhaseChanged { old: WizardPhase, new: WizardPhase },

    /// The booking record was handed to the submission sink
    BookingSubmitted { fields: usize },

    /// The submission sink refused the record
    SubmissionFailed { reason: String },
}

impl WizardEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            WizardEvent::FieldChanged { field } => format!("Field changed: {}", field),
            WizardEvent::ValidationFailed { step, errors } => {
                format!("Step {} invalid: {}", step.number(), errors)
            }
            WizardEvent::StepAccepted { step } => format!("Step {} accepted", step.number()),
            WizardEvent::StepChanged { from, to } => {
                format!("Step {} -> {}", from.number(), to.number())
            }
            WizardEvent::PhaseChanged { new, .. } => {
                format!("Phase: {}", new.description())
            }
            WizardEvent::BookingSubmitted { fields } => {
                format!("Booking submitted ({} fields)", fields)
            }
            WizardEvent::SubmissionFailed { reason } => format!("Submission failed: {}", reason),
        }
    }
}
