//! Step transition scheduler
//!
//! Sequences the two-phase visual transition between steps:
//!
//! ```text
//! begin ──> Exiting ──(D)──> ApplyStep + Entering ──(D)──> Idle
//! ```
//!
//! Deadlines are checked by [`TransitionScheduler::poll`], which the owner calls
//! from its event loop. Each transition is identified by a [`TransitionHandle`];
//! starting a new one cancels the outstanding handle first, so a stale deadline
//! can never apply a step change or a phase update.

use std::time::{Duration, Instant};

use super::steps::BookingStep;

/// Default exit/enter animation duration
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Visual phase of the step container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardPhase {
    /// No transition running, input accepted
    #[default]
    Idle,

    /// Old step animating out
    Exiting,

    /// New step animating in
    Entering,
}

impl WizardPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, WizardPhase::Idle)
    }

    /// CSS-style class the presentation layer applies, if any
    pub fn visual_class(&self) -> Option<&'static str> {
        match self {
            WizardPhase::Idle => None,
            WizardPhase::Exiting => Some("step-exit"),
            WizardPhase::Entering => Some("step-enter"),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardPhase::Idle => "Idle",
            WizardPhase::Exiting => "Exiting",
            WizardPhase::Entering => "Entering",
        }
    }
}

/// Identity of one scheduled transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle(u64);

/// Something the owner must apply after a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// The exit animation finished; switch the active step
    ApplyStep {
        handle: TransitionHandle,
        target: BookingStep,
    },

    /// The phase moved on
    PhaseChanged {
        handle: TransitionHandle,
        old: WizardPhase,
        new: WizardPhase,
    },
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Exit,
    Enter,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TransitionHandle,
    target: BookingStep,
    stage: Stage,
    deadline: Instant,
}

/// Owner of [`WizardPhase`] and the outstanding transition
#[derive(Debug)]
pub struct TransitionScheduler {
    duration: Duration,
    phase: WizardPhase,
    pending: Option<Pending>,
    next_id: u64,
}

impl TransitionScheduler {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            phase: WizardPhase::Idle,
            pending: None,
            next_id: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// Handle of the transition in flight, if any
    pub fn in_flight(&self) -> Option<TransitionHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Check whether `handle` still identifies the outstanding transition
    pub fn is_current(&self, handle: TransitionHandle) -> bool {
        self.in_flight() == Some(handle)
    }

    /// Start a transition towards `target`, superseding any outstanding one
    ///
    /// Returns the new handle and the phase change to `Exiting`.
    pub fn begin(
        &mut self,
        target: BookingStep,
        now: Instant,
    ) -> (TransitionHandle, TransitionEffect) {
        if let Some(stale) = self.cancel() {
            tracing::debug!(handle = stale.0, "Superseded outstanding transition");
        }

        self.next_id += 1;
        let handle = TransitionHandle(self.next_id);
        self.pending = Some(Pending {
            handle,
            target,
            stage: Stage::Exit,
            deadline: now + self.duration,
        });

        let old = self.phase;
        self.phase = WizardPhase::Exiting;
        (
            handle,
            TransitionEffect::PhaseChanged {
                handle,
                old,
                new: WizardPhase::Exiting,
            },
        )
    }

    /// Drop the outstanding transition and return to `Idle`
    pub fn cancel(&mut self) -> Option<TransitionHandle> {
        let cancelled = self.pending.take().map(|p| p.handle);
        self.phase = WizardPhase::Idle;
        cancelled
    }

    /// Fire every deadline that has passed at `now`, in order
    pub fn poll(&mut self, now: Instant) -> Vec<TransitionEffect> {
        let mut effects = Vec::new();

        while let Some(pending) = self.pending {
            if pending.deadline > now {
                break;
            }

            match pending.stage {
                Stage::Exit => {
                    effects.push(TransitionEffect::ApplyStep {
                        handle: pending.handle,
                        target: pending.target,
                    });
                    effects.push(self.set_phase(pending.handle, WizardPhase::Entering));
                    self.pending = Some(Pending {
                        stage: Stage::Enter,
                        deadline: pending.deadline + self.duration,
                        ..pending
                    });
                }
                Stage::Enter => {
                    effects.push(self.set_phase(pending.handle, WizardPhase::Idle));
                    self.pending = None;
                }
            }
        }

        effects
    }

    fn set_phase(&mut self, handle: TransitionHandle, new: WizardPhase) -> TransitionEffect {
        let old = self.phase;
        self.phase = new;
        TransitionEffect::PhaseChanged { handle, old, new }
    }
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}
