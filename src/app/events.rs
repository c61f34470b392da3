//! Outbound controller events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::fsm::VentState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Automatic mode entered.
    AutoStarted { open_above: i32, close_below: i32 },

    /// One sensor poll has been evaluated.  `next_poll_ms` is the delay
    /// before the following poll.
    Reading {
        ppm: i32,
        state: VentState,
        next_poll_ms: u32,
    },

    /// The vent state changed.
    StateChanged { from: VentState, to: VentState },

    /// Every targeted zone was pulsed in one direction.
    ZonesActuated { state: VentState, zones: usize },

    /// The sensor went offline and automatic mode ended.
    SensorLost { state: VentState },

    /// The device min/max were reset to the current reading.
    MinMaxReset { ppm: i32 },
}
