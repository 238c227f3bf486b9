//! Booking wizard module
//!
//! Step-gated form state machine for a four-stage travel booking.
//!
//! ## Architecture
//!
//! ```text
//! BookingWizard
//!   ├── WizardState (current step, cumulative record, last errors)
//!   ├── FieldStore (direct + controlled field values)
//!   ├── TransitionScheduler (WizardPhase, cancellable exit/enter timers)
//!   └── SubmissionSink (receives the finished record)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use booking_wizard::wizard::{BookingWizard, NavigationResult};
//!
//! let mut wizard = BookingWizard::default();
//!
//! wizard.set_direct("firstname", "Ada")?;
//! match wizard.advance()? {
//!     NavigationResult::Invalid(errors) => { /* show errors */ }
//!     NavigationResult::Moving(step) => { /* play exit animation */ }
//!     _ => {}
//! }
//!
//! // From the event loop
//! wizard.tick();
//! ```
//!
//! ## Steps
//!
//! 1. **Traveler** - names, email, phone, party size
//! 2. **Destination** - destination and date range
//! 3. **Accommodation** - star rating, room type, special requests
//! 4. **Payment** - card details, then submit and start over

pub mod flow;
pub mod state;
pub mod steps;
pub mod transition;

// Re-export commonly used types
pub use flow::{BookingWizard, NavigationResult};
pub use state::WizardState;
pub use steps::{BookingStep, StepContent};
pub use transition::{TransitionHandle, TransitionScheduler, WizardPhase};
