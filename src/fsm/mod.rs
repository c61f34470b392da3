//! Vent state machine.
//!
//! ```text
//!            [ppm > open_above]
//!   CLOSED ───────────────────────▶ OPEN
//!     ▲                               │
//!     └───────────────────────────────┘
//!            [ppm < close_below]
//! ```
//!
//! [`step`] is pure: it maps the current state and one reading to the next
//! state, the actuation to perform (if any) and the poll rate to switch to
//! (if any).  The control loop in [`crate::app::service`] applies the result.

use core::fmt;

use crate::control::hysteresis::ThresholdPolicy;

/// Logical position of every targeted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VentState {
    Closed,
    Open,
}

impl fmt::Display for VentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("CLOSED"),
            Self::Open => f.write_str("OPEN"),
        }
    }
}

/// Zone-wide command issued on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuation {
    OpenAll,
    CloseAll,
}

/// Polling speed requested by a reading outside the dead band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollRate {
    /// CO2 is high, watch it closely.
    Fast,
    /// CO2 is low, poll rarely.
    Slow,
}

/// Outcome of evaluating one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: VentState,
    pub actuation: Option<Actuation>,
    /// `None` inside the dead band: keep the current interval.
    pub rate: Option<PollRate>,
}

/// Evaluate one reading against the policy.
pub fn step(state: VentState, ppm: i32, policy: &ThresholdPolicy) -> Step {
    if policy.wants_open(ppm) {
        Step {
            next: VentState::Open,
            actuation: (state == VentState::Closed).then_some(Actuation::OpenAll),
            rate: Some(PollRate::Fast),
        }
    } else if policy.wants_closed(ppm) {
        Step {
            next: VentState::Closed,
            actuation: (state == VentState::Open).then_some(Actuation::CloseAll),
            rate: Some(PollRate::Slow),
        }
    } else {
        Step {
            next: state,
            actuation: None,
            rate: None,
        }
    }
}
