//! Port traits — the boundary between the controller and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! The hub adapter implements the hardware ports, the log adapter implements
//! [`EventSink`], the console adapter implements [`PromptPort`].  Tests
//! implement all of them in memory.  Delays go through
//! [`embedded_hal::delay::DelayNs`] so the control loop never sleeps for
//! real under test.

use crate::error::Result;

// ───────────────────────────────────────────────────────────────
// Relay port (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// A momentary relay wired across one button of a window remote.
///
/// No position is tracked: a relay only knows how to press its button.
pub trait RelayPort {
    /// Close the relay for `duration_ms`, then release it.  Returns once the
    /// pulse has been accepted, not when it ends.
    fn pulse(&mut self, duration_ms: u32) -> Result<()>;

    /// Whether the relay is currently reachable.
    fn is_online(&self) -> bool;

    /// Human-readable identity used in error messages.
    fn describe(&self) -> String;
}

// ───────────────────────────────────────────────────────────────
// CO2 sensor port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// CO2 sensor with device-side min/max tracking.  Values are ppm.
pub trait Co2SensorPort {
    fn is_online(&self) -> bool;

    fn current_value(&self) -> Result<i32>;

    fn lowest_value(&self) -> Result<i32>;

    fn highest_value(&self) -> Result<i32>;

    fn set_lowest_value(&mut self, ppm: i32) -> Result<()>;

    fn set_highest_value(&mut self, ppm: i32) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Hardware port (device discovery)
// ───────────────────────────────────────────────────────────────

/// Discovery of devices on the registered hubs.
pub trait HardwarePort {
    type Relay: RelayPort;
    type Sensor: Co2SensorPort;

    /// Resolve a relay by hardware id or logical name.  The handle is
    /// returned even if the device is offline; check with
    /// [`RelayPort::is_online`].
    fn find_relay(&self, hardware_id: &str) -> Result<Self::Relay>;

    /// The first CO2 sensor found, or [`crate::error::Error::NoCo2Sensor`].
    fn first_co2_sensor(&self) -> Result<Self::Sensor>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The controller reports what it does through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Prompt port (domain ↔ operator)
// ───────────────────────────────────────────────────────────────

/// Blocks until the operator acknowledges `message`.
///
/// Used by the pairing procedure, which needs buttons pressed by hand on
/// the remote and on the gateway.
pub trait PromptPort {
    fn wait_for_operator(&mut self, message: &str) -> Result<()>;
}
