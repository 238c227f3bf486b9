//! Booking wizard state machine
//!
//! Owns the active step, the cumulative record, the field store and the
//! transition scheduler. Every mutation goes through this type.

use std::sync::Arc;
use std::time::Instant;

use super::state::WizardState;
use super::steps::{BookingStep, StepContent};
use super::transition::{TransitionEffect, TransitionScheduler, WizardPhase};
use crate::catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::WizardConfig;
use crate::error::WizardError;
use crate::form::record::CumulativeRecord;
use crate::form::store::FieldStore;
use crate::form::value::{DateRange, FieldValue};
use crate::messaging::{EventBus, WizardEvent};
use crate::schema::Binding;
use crate::submission::{LogSink, SubmissionSink};
use crate::validator::{self, ValidationErrorSet};

/// Navigation result
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationResult {
    /// Transition scheduled towards this step
    Moving(BookingStep),

    /// Validation failed, still on the same step
    Invalid(ValidationErrorSet),

    /// Final step accepted and the booking handed to the submission sink
    Completed { fields: usize },

    /// Submission sink refused the booking; record and step are kept
    SubmissionFailed { reason: String },

    /// Navigation blocked at a boundary
    Blocked { reason: String },
}

/// Booking wizard
pub struct BookingWizard {
    state: WizardState,
    store: FieldStore,
    scheduler: TransitionScheduler,
    clock: Arc<dyn Clock>,
    sink: Box<dyn SubmissionSink>,
    bus: Option<EventBus>,
}

impl BookingWizard {
    /// Create a wizard on the first step with an empty record
    pub fn new(
        config: &WizardConfig,
        clock: Arc<dyn Clock>,
        sink: Box<dyn SubmissionSink>,
    ) -> Self {
        Self {
            state: WizardState::new(),
            store: FieldStore::seeded(clock.today()),
            scheduler: TransitionScheduler::new(config.transition()),
            clock,
            sink,
            bus: None,
        }
    }

    /// Publish events on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Get current step
    pub fn current_step(&self) -> BookingStep {
        self.state.current_step()
    }

    pub fn phase(&self) -> WizardPhase {
        self.scheduler.phase()
    }

    /// Input is only accepted while no transition is running
    pub fn is_idle(&self) -> bool {
        self.phase().is_idle()
    }

    /// Get wizard state
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Errors from the latest validation attempt
    pub fn errors(&self) -> &ValidationErrorSet {
        self.state.errors()
    }

    pub fn record(&self) -> &CumulativeRecord {
        self.state.record()
    }

    /// Current value of a field, as widgets should display it
    pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
        self.store.value(name)
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.store.date_range()
    }

    /// Label of the option selected in a select field
    pub fn selected_label(&self, field: &str) -> Option<&'static str> {
        let value = self.store.value(field)?.as_text()?;
        catalog::label_for(field, value)
    }

    /// Background asset key for the active step
    pub fn background_key(&self) -> &'static str {
        self.current_step().background_key()
    }

    pub fn step_content(&self) -> StepContent {
        self.current_step().content()
    }

    /// Completion progress of the booking in progress (0.0-1.0)
    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.is_idle() && self.current_step().previous().is_some()
    }

    /// Validate the active step and move forward on success
    pub fn advance(&mut self) -> Result<NavigationResult, WizardError> {
        self.ensure_idle()?;

        let step = self.current_step();
        let schema = step.schema();
        let values = self.store.values_for(schema);

        match validator::validate(schema, &values, self.clock.today()) {
            Err(errors) => {
                tracing::info!(step = step.number(), errors = %errors, "Step validation failed");
                self.state.set_errors(errors.clone());
                self.publish(WizardEvent::ValidationFailed {
                    step,
                    errors: errors.clone(),
                });
                Ok(NavigationResult::Invalid(errors))
            }
            Ok(normalized) => {
                tracing::debug!(step = step.number(), fields = normalized.len(), "Step accepted");
                self.state.accept_step(step, normalized);
                self.publish(WizardEvent::StepAccepted { step });

                match step.next() {
                    Some(next) => {
                        self.start_transition(next);
                        Ok(NavigationResult::Moving(next))
                    }
                    None => Ok(self.finalize()),
                }
            }
        }
    }

    /// Hand the record to the sink and start over
    ///
    /// A failing sink leaves the wizard on the last step with the record
    /// intact so the user can retry.
    fn finalize(&mut self) -> NavigationResult {
        if let Err(e) = self.sink.submit(self.state.record()) {
            let reason = e.to_string();
            tracing::warn!(error = %reason, "Booking submission failed");
            self.publish(WizardEvent::SubmissionFailed {
                reason: reason.clone(),
            });
            return NavigationResult::SubmissionFailed { reason };
        }

        let record = self.state.finish_booking();
        self.store.reset(self.clock.today());
        let fields = record.len();
        tracing::info!(
            fields,
            total = self.state.submitted_count(),
            "Booking completed"
        );
        self.publish(WizardEvent::BookingSubmitted { fields });

        self.start_transition(BookingStep::Traveler);
        NavigationResult::Completed { fields }
    }

    /// Move to the previous step without validating
    ///
    /// Values already merged for that step stay in the record and in the store.
    pub fn retreat(&mut self) -> Result<NavigationResult, WizardError> {
        self.ensure_idle()?;

        match self.current_step().previous() {
            Some(previous) => {
                self.state.clear_errors();
                self.start_transition(previous);
                Ok(NavigationResult::Moving(previous))
            }
            None => Ok(NavigationResult::Blocked {
                reason: "Already at first step".to_string(),
            }),
        }
    }

    /// Push a controlled widget's value into the store
    pub fn update_controlled_field(
        &mut self,
        name: &str,
        value: FieldValue,
    ) -> Result<(), WizardError> {
        self.ensure_idle()?;
        let schema = self.current_step().schema();
        self.store.set_field_value(schema, name, value)?;
        self.publish(WizardEvent::FieldChanged {
            field: name.to_string(),
        });
        Ok(())
    }

    /// Record an edit of a plain input
    pub fn set_direct(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), WizardError> {
        self.ensure_idle()?;
        let schema = self.current_step().schema();
        self.store.set_direct(schema, name, value.into())?;
        self.publish(WizardEvent::FieldChanged {
            field: name.to_string(),
        });
        Ok(())
    }

    /// Write a form submission's values, then advance
    ///
    /// Each value goes through the binding its field declares. Values for
    /// fields outside the active step are ignored.
    pub fn submit_step<I, K>(&mut self, raw: I) -> Result<NavigationResult, WizardError>
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: AsRef<str>,
    {
        self.ensure_idle()?;
        let schema = self.current_step().schema();

        for (name, value) in raw {
            let name = name.as_ref();
            match schema.field(name).map(|rule| rule.binding) {
                Some(Binding::Direct) => self.store.set_direct(schema, name, value)?,
                Some(Binding::Controlled) => self.store.set_field_value(schema, name, value)?,
                None => tracing::debug!(field = name, "Ignoring field outside active step"),
            }
        }

        self.advance()
    }

    /// Presentation-facing name for [`BookingWizard::retreat`]
    pub fn go_back(&mut self) -> Result<NavigationResult, WizardError> {
        self.retreat()
    }

    /// Presentation-facing name for [`BookingWizard::update_controlled_field`]
    pub fn set_controlled_field(
        &mut self,
        name: &str,
        value: FieldValue,
    ) -> Result<(), WizardError> {
        self.update_controlled_field(name, value)
    }

    /// Apply transition deadlines that have passed; true if anything changed
    pub fn tick(&mut self) -> bool {
        let now = self.clock.instant();
        self.tick_at(now)
    }

    /// Discard the booking in progress and return to the first step
    pub fn reset(&mut self) {
        if self.scheduler.cancel().is_some() {
            tracing::debug!("Cancelled transition on reset");
        }
        let from = self.current_step();
        self.state.reset();
        self.store.reset(self.clock.today());
        if from != BookingStep::Traveler {
            self.publish(WizardEvent::StepChanged {
                from,
                to: BookingStep::Traveler,
            });
        }
    }

    /// Same as [`BookingWizard::tick`] with an explicit instant
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let effects = self.scheduler.poll(now);
        let changed = !effects.is_empty();
        for effect in effects {
            self.apply(effect);
        }
        changed
    }

    fn start_transition(&mut self, target: BookingStep) {
        let now = self.clock.instant();
        let (_handle, effect) = self.scheduler.begin(target, now);
        self.apply(effect);

        // Zero-length transitions settle right away
        self.tick_at(now);
    }

    fn apply(&mut self, effect: TransitionEffect) {
        match effect {
            TransitionEffect::ApplyStep { target, .. } => {
                let from = self.current_step();
                self.state.set_current_step(target);
                tracing::info!(from = from.number(), to = target.number(), "Step changed");
                self.publish(WizardEvent::StepChanged { from, to: target });
            }
            TransitionEffect::PhaseChanged { old, new, .. } => {
                tracing::trace!(phase = new.description(), "Phase changed");
                self.publish(WizardEvent::PhaseChanged { old, new });
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.is_idle() {
            Ok(())
        } else {
            tracing::warn!(phase = self.phase().description(), "Input rejected during transition");
            Err(WizardError::TransitionInFlight)
        }
    }

    fn publish(&self, event: WizardEvent) {
        if let Some(bus) = &self.bus {
            bus.publish(event);
        }
    }
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new(
            &WizardConfig::default(),
            Arc::new(SystemClock),
            Box::new(LogSink),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::SubmissionError;
    use crate::submission::ChannelSink;
    use chrono::NaiveDate;
    use std::time::Duration;

    const D: Duration = Duration::from_millis(300);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 3, 14).unwrap()
    }

    fn wizard_with(sink: Box<dyn SubmissionSink>) -> (BookingWizard, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(today()));
        let wizard = BookingWizard::new(&WizardConfig::default(), clock.clone(), sink);
        (wizard, clock)
    }

    fn wizard() -> (BookingWizard, Arc<ManualClock>) {
        wizard_with(Box::new(LogSink))
    }

    /// Let a full exit + enter transition run
    fn settle(wizard: &mut BookingWizard, clock: &ManualClock) {
        clock.advance(D);
        wizard.tick();
        clock.advance(D);
        wizard.tick();
        assert!(wizard.is_idle());
    }

    fn traveler() -> Vec<(&'static str, FieldValue)> {
        vec![
            ("firstname", "Ada".into()),
            ("surname", "Lovelace".into()),
            ("email", "ada@example.com".into()),
            ("phoneNumber", "+12345678901".into()),
            ("numberOfTravelers", "2".into()),
            ("numberOfChildren", "0".into()),
        ]
    }

    #[test]
    fn test_new_wizard() {
        let (wizard, _clock) = wizard();
        assert_eq!(wizard.current_step(), BookingStep::Traveler);
        assert!(wizard.is_idle());
        assert!(wizard.record().is_empty());
        assert!(!wizard.can_go_back());
        assert_eq!(wizard.date_range(), Some(DateRange::one_day_from(today())));
        assert_eq!(wizard.background_key(), "pexels-1");
    }

    #[test]
    fn test_step_changes_only_after_exit_delay() {
        let (mut wizard, clock) = wizard();

        let result = wizard.submit_step(traveler()).unwrap();
        assert_eq!(result, NavigationResult::Moving(BookingStep::Destination));
        assert_eq!(wizard.phase(), WizardPhase::Exiting);
        assert_eq!(wizard.current_step(), BookingStep::Traveler);

        clock.advance(D);
        assert!(wizard.tick());
        assert_eq!(wizard.current_step(), BookingStep::Destination);
        assert_eq!(wizard.phase(), WizardPhase::Entering);

        clock.advance(D);
        assert!(wizard.tick());
        assert!(wizard.is_idle());
        assert!(!wizard.tick());
    }

    #[test]
    fn test_invalid_submission_stays() {
        let (mut wizard, _clock) = wizard();

        let mut values = traveler();
        values[2].1 = "not-an-email".into();
        values[3].1 = "123".into();

        let NavigationResult::Invalid(errors) = wizard.submit_step(values).unwrap() else {
            panic!("expected validation failure");
        };
        assert!(errors.contains("email"));
        assert!(errors.contains("phoneNumber"));
        assert_eq!(wizard.errors(), &errors);
        assert_eq!(wizard.current_step(), BookingStep::Traveler);
        assert!(wizard.is_idle());
        assert!(wizard.record().is_empty());
    }

    #[test]
    fn test_input_rejected_during_transition() {
        let (mut wizard, clock) = wizard();
        wizard.submit_step(traveler()).unwrap();

        assert_eq!(wizard.advance(), Err(WizardError::TransitionInFlight));
        assert_eq!(wizard.go_back(), Err(WizardError::TransitionInFlight));
        assert_eq!(
            wizard.set_direct("firstname", "Grace"),
            Err(WizardError::TransitionInFlight)
        );

        clock.advance(D);
        wizard.tick();
        // Still entering
        assert_eq!(
            wizard.set_controlled_field("destination", "ldn".into()),
            Err(WizardError::TransitionInFlight)
        );

        clock.advance(D);
        wizard.tick();
        assert!(wizard.set_controlled_field("destination", "ldn".into()).is_ok());
    }

    #[test]
    fn test_retreat_keeps_values() {
        let (mut wizard, clock) = wizard();
        wizard.submit_step(traveler()).unwrap();
        settle(&mut wizard, &clock);

        assert!(wizard.can_go_back());
        assert_eq!(
            wizard.go_back().unwrap(),
            NavigationResult::Moving(BookingStep::Traveler)
        );
        settle(&mut wizard, &clock);

        assert_eq!(wizard.current_step(), BookingStep::Traveler);
        assert_eq!(wizard.field_value("firstname"), Some(&FieldValue::text("Ada")));
        assert!(wizard.record().contains("firstname"));
    }

    #[test]
    fn test_retreat_at_first_step_is_blocked() {
        let (mut wizard, _clock) = wizard();
        assert!(matches!(
            wizard.retreat().unwrap(),
            NavigationResult::Blocked { .. }
        ));
        assert!(wizard.is_idle());
    }

    #[test]
    fn test_controlled_field_selection_label() {
        let (mut wizard, clock) = wizard();
        wizard.submit_step(traveler()).unwrap();
        settle(&mut wizard, &clock);

        wizard
            .update_controlled_field("destination", "tky".into())
            .unwrap();
        assert_eq!(wizard.selected_label("destination"), Some("Tokyo, Japan"));
        assert_eq!(
            wizard.set_direct("destination", "ldn"),
            Err(WizardError::BindingMismatch {
                field: "destination".to_string(),
                expected: "controlled",
            })
        );
    }

    #[test]
    fn test_events_published() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        let (wizard, clock) = wizard();
        let mut wizard = wizard.with_event_bus(bus);

        wizard.submit_step(traveler()).unwrap();
        settle(&mut wizard, &clock);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                WizardEvent::StepAccepted {
                    step: BookingStep::Traveler
                },
                WizardEvent::PhaseChanged {
                    old: WizardPhase::Idle,
                    new: WizardPhase::Exiting
                },
                WizardEvent::StepChanged {
                    from: BookingStep::Traveler,
                    to: BookingStep::Destination
                },
                WizardEvent::PhaseChanged {
                    old: WizardPhase::Exiting,
                    new: WizardPhase::Entering
                },
                WizardEvent::PhaseChanged {
                    old: WizardPhase::Entering,
                    new: WizardPhase::Idle
                },
            ]
        );
    }

    #[test]
    fn test_submission_failure_keeps_booking() {
        let sink = |_: &CumulativeRecord| -> Result<(), SubmissionError> {
            Err(SubmissionError::Rejected("card declined".to_string()))
        };
        let (mut wizard, clock) = wizard_with(Box::new(sink));

        wizard.submit_step(traveler()).unwrap();
        settle(&mut wizard, &clock);
        wizard
            .submit_step([("destination", FieldValue::text("par"))])
            .unwrap();
        settle(&mut wizard, &clock);
        wizard
            .submit_step([
                ("hotelStarRating", FieldValue::text("4")),
                ("typeOfRoom", FieldValue::text("double")),
            ])
            .unwrap();
        settle(&mut wizard, &clock);

        let result = wizard
            .submit_step([
                ("cardholderName", FieldValue::text("Ada Lovelace")),
                ("cardNumber", FieldValue::text("4111111111111111")),
                ("expiryDate", FieldValue::text("2028-01")),
                ("cvv", FieldValue::text("123")),
            ])
            .unwrap();

        assert_eq!(
            result,
            NavigationResult::SubmissionFailed {
                reason: "Submission rejected: card declined".to_string()
            }
        );
        assert_eq!(wizard.current_step(), BookingStep::Payment);
        assert!(wizard.is_idle());
        assert!(wizard.record().contains("cvv"));
        assert!(wizard.record().contains("firstname"));
    }

    #[test]
    fn test_zero_duration_transition_is_immediate() {
        let clock = Arc::new(ManualClock::new(today()));
        let config = WizardConfig {
            transition_ms: 0,
            ..WizardConfig::default()
        };
        let (sink, _rx) = ChannelSink::new();
        let mut wizard = BookingWizard::new(&config, clock, Box::new(sink));

        wizard.submit_step(traveler()).unwrap();
        assert_eq!(wizard.current_step(), BookingStep::Destination);
        assert!(wizard.is_idle());
    }

    #[test]
    fn test_reset_discards_booking() {
        let (mut wizard, clock) = wizard();
        wizard.submit_step(traveler()).unwrap();
        clock.advance(D);
        wizard.tick();

        wizard.reset();
        assert!(wizard.is_idle());
        assert_eq!(wizard.current_step(), BookingStep::Traveler);
        assert!(wizard.record().is_empty());
        assert!(wizard.field_value("firstname").is_none());

        // The cancelled transition never fires
        clock.advance(D * 4);
        assert!(!wizard.tick());
        assert_eq!(wizard.current_step(), BookingStep::Traveler);
    }
}
