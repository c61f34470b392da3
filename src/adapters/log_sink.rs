//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events through the `log`
//! facade.  The binary routes those records to stderr.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::AutoStarted {
                open_above,
                close_below,
            } => {
                info!("AUTO  | open above {open_above} ppm, close below {close_below} ppm");
            }
            AppEvent::Reading {
                ppm,
                state,
                next_poll_ms,
            } => {
                debug!("READ  | co2={ppm}ppm | state={state} | next poll in {next_poll_ms}ms");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {from} -> {to}");
            }
            AppEvent::ZonesActuated { state, zones } => {
                debug!("PULSE | {zones} zone(s) -> {state}");
            }
            AppEvent::SensorLost { state } => {
                warn!("LOST  | CO2 sensor offline while {state}");
            }
            AppEvent::MinMaxReset { ppm } => {
                info!("RESET | min/max set to {ppm}ppm");
            }
        }
    }
}
