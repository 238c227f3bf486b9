//! Wizard event broadcasting
//!
//! ```text
//! ┌───────────────┐   publish   ┌───────────┐   Receiver<WizardEvent>   ┌──────────────┐
//! │ BookingWizard │ ──────────> │ Event Bus │ ────────────────────────> │ Presentation │
//! └───────────────┘             └───────────┘                           └──────────────┘
//! ```
//!
//! The wizard publishes; subscribers only read. Nothing flows back through the
//! bus, so the wizard stays the single owner of its state.

pub mod bus;
pub mod events;

pub use bus::EventBus;
pub use events::WizardEvent;
