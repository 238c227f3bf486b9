//! Wizard state management
//!
//! Tracks the active step, the cumulative record and the latest validation
//! errors for the booking in progress.

use std::collections::HashSet;

use super::steps::BookingStep;
use crate::form::record::{CumulativeRecord, NormalizedValues};
use crate::validator::ValidationErrorSet;

/// Wizard state
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    /// Current step
    current_step: BookingStep,

    /// Steps whose values have been accepted for this booking
    completed_steps: HashSet<BookingStep>,

    /// Validated values from every accepted step
    record: CumulativeRecord,

    /// Errors from the latest validation attempt
    errors: ValidationErrorSet,

    /// Bookings handed to the submission sink since start
    submitted_count: usize,
}

impl WizardState {
    /// Create a new wizard state (fresh start)
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current step
    pub fn current_step(&self) -> BookingStep {
        self.current_step
    }

    /// Set current step
    pub fn set_current_step(&mut self, step: BookingStep) {
        self.current_step = step;
    }

    pub fn record(&self) -> &CumulativeRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationErrorSet {
        &self.errors
    }

    /// Replace the error set with the outcome of a new attempt
    pub fn set_errors(&mut self, errors: ValidationErrorSet) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ValidationErrorSet::new();
    }

    /// Record a successful validation of `step`
    ///
    /// The step's own keys are replaced wholesale; other steps' keys stay.
    pub fn accept_step(&mut self, step: BookingStep, values: NormalizedValues) {
        self.record.replace_step(step.schema().field_names(), values);
        self.completed_steps.insert(step);
        self.clear_errors();
    }

    /// Check if a step is completed
    pub fn is_step_completed(&self, step: BookingStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Get number of completed steps
    pub fn completed_count(&self) -> usize {
        self.completed_steps.len()
    }

    /// Get completion progress (0.0-1.0)
    pub fn progress(&self) -> f32 {
        let total_steps = BookingStep::total_steps() as f32;
        let completed_count = self.completed_steps.len() as f32;

        (completed_count / total_steps).min(1.0)
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted_count
    }

    /// Hand out the finished record and start the next booking
    ///
    /// The current step is left alone; the transition back to the first step
    /// moves it once the exit animation has run.
    pub fn finish_booking(&mut self) -> CumulativeRecord {
        self.submitted_count += 1;
        self.completed_steps.clear();
        self.clear_errors();
        self.record.take()
    }

    /// Reset wizard to beginning, discarding the booking in progress
    pub fn reset(&mut self) {
        self.current_step = BookingStep::Traveler;
        self.completed_steps.clear();
        self.record = CumulativeRecord::new();
        self.clear_errors();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::value::FieldValue;

    fn values(name: &str, value: &str) -> NormalizedValues {
        [(name.to_string(), FieldValue::text(value))].into_iter().collect()
    }

    #[test]
    fn test_new_wizard_state() {
        let state = WizardState::new();
        assert_eq!(state.current_step(), BookingStep::Traveler);
        assert!(state.record().is_empty());
        assert!(state.errors().is_empty());
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_accept_step() {
        let mut state = WizardState::new();
        let mut errors = ValidationErrorSet::new();
        errors.insert("firstname", "Firstname is required");
        state.set_errors(errors);

        state.accept_step(BookingStep::Traveler, values("firstname", "Ada"));
        assert!(state.is_step_completed(BookingStep::Traveler));
        assert!(state.errors().is_empty());
        assert!(state.record().contains("firstname"));
        assert_eq!(state.progress(), 0.25);
    }

    #[test]
    fn test_accept_step_replaces_own_keys_only() {
        let mut state = WizardState::new();
        state.accept_step(BookingStep::Traveler, values("numberOfChildren", "3"));
        state.accept_step(BookingStep::Destination, values("destination", "ldn"));

        state.accept_step(BookingStep::Traveler, values("firstname", "Ada"));
        assert!(!state.record().contains("numberOfChildren"));
        assert!(state.record().contains("firstname"));
        assert!(state.record().contains("destination"));
    }

    #[test]
    fn test_finish_booking() {
        let mut state = WizardState::new();
        state.set_current_step(BookingStep::Payment);
        state.accept_step(BookingStep::Payment, values("cvv", "123"));

        let record = state.finish_booking();
        assert_eq!(record.len(), 1);
        assert!(state.record().is_empty());
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.submitted_count(), 1);
        assert_eq!(state.current_step(), BookingStep::Payment);
    }

    #[test]
    fn test_reset() {
        let mut state = WizardState::new();
        state.accept_step(BookingStep::Traveler, values("firstname", "Ada"));
        state.set_current_step(BookingStep::Accommodation);

        state.reset();
        assert_eq!(state.current_step(), BookingStep::Traveler);
        assert!(state.record().is_empty());
        assert_eq!(state.completed_count(), 0);
    }
}
