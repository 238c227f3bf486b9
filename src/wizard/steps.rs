//! Booking step definitions
//!
//! Defines the four stages of the booking wizard and their display metadata.

use crate::error::WizardError;
use crate::schema::{self, Schema, STEP_COUNT};

/// Display content of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContent {
    pub heading: &'static str,
    pub text: &'static str,
    pub background_key: &'static str,
    pub submit_label: &'static str,
}

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookingStep {
    /// Traveler info - names, contact details, party size
    Traveler,

    /// Destination and travel dates
    Destination,

    /// Hotel rating, room type, special requests
    Accommodation,

    /// Card details
    Payment,
}

impl BookingStep {
    /// Step for a zero-based index
    pub fn from_index(index: usize) -> Result<BookingStep, WizardError> {
        Self::all_steps()
            .get(index)
            .copied()
            .ok_or(WizardError::StepOutOfRange {
                index,
                count: STEP_COUNT,
            })
    }

    /// Zero-based index, matching the schema registry
    pub fn index(&self) -> usize {
        match self {
            BookingStep::Traveler => 0,
            BookingStep::Destination => 1,
            BookingStep::Accommodation => 2,
            BookingStep::Payment => 3,
        }
    }

    /// Get step number (1-indexed)
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    /// Get total number of steps
    pub fn total_steps() -> usize {
        STEP_COUNT
    }

    /// Validation schema for this step
    pub fn schema(&self) -> &'static Schema {
        // Every variant has a schema; the registry and this enum share STEP_COUNT.
        &schema::all_schemas()[self.index()]
    }

    /// Get step title
    pub fn title(&self) -> &'static str {
        match self {
            BookingStep::Traveler => "Welcome to Your Adventure",
            BookingStep::Destination => "Customize Your Destination",
            BookingStep::Accommodation => "Choose Your Comfort",
            BookingStep::Payment => "Payment Information",
        }
    }

    /// Get step description
    pub fn description(&self) -> &'static str {
        match self {
            BookingStep::Traveler => "Start planning your dream trip with us.",
            BookingStep::Destination => "Select your dream destination and travel dates.",
            BookingStep::Accommodation => "Select your preferred hotel ratings and room type.",
            BookingStep::Payment => "Securely enter your payment details to book your trip.",
        }
    }

    /// Opaque background asset key for the presentation layer
    pub fn background_key(&self) -> &'static str {
        match self {
            BookingStep::Traveler => "pexels-1",
            BookingStep::Destination => "pexels-2",
            BookingStep::Accommodation => "pexels-3",
            BookingStep::Payment => "pexels-4",
        }
    }

    /// Everything the presentation layer shows for this step
    pub fn content(&self) -> StepContent {
        StepContent {
            heading: self.title(),
            text: self.description(),
            background_key: self.background_key(),
            submit_label: self.submit_label(),
        }
    }

    /// Label of the forward button
    pub fn submit_label(&self) -> &'static str {
        if self.is_last() {
            "Submit"
        } else {
            "Next"
        }
    }

    /// Check if this is the first step
    pub fn is_first(&self) -> bool {
        matches!(self, BookingStep::Traveler)
    }

    /// Check if this is the last step
    pub fn is_last(&self) -> bool {
        matches!(self, BookingStep::Payment)
    }

    /// Get next step
    pub fn next(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Traveler => Some(BookingStep::Destination),
            BookingStep::Destination => Some(BookingStep::Accommodation),
            BookingStep::Accommodation => Some(BookingStep::Payment),
            BookingStep::Payment => None,
        }
    }

    /// Get previous step
    pub fn previous(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Traveler => None,
            BookingStep::Destination => Some(BookingStep::Traveler),
            BookingStep::Accommodation => Some(BookingStep::Destination),
            BookingStep::Payment => Some(BookingStep::Accommodation),
        }
    }

    /// Get all steps in order
    pub fn all_steps() -> [BookingStep; STEP_COUNT] {
        [
            BookingStep::Traveler,
            BookingStep::Destination,
            BookingStep::Accommodation,
            BookingStep::Payment,
        ]
    }
}

impl Default for BookingStep {
    fn default() -> Self {
        BookingStep::Traveler
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
