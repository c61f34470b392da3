//! CO2 sensor helpers built on [`Co2SensorPort`].

use core::fmt;

use crate::app::ports::Co2SensorPort;
use crate::error::Result;

/// Current reading plus the device-side extremes since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Co2Snapshot {
    pub current_ppm: i32,
    pub lowest_ppm: i32,
    pub highest_ppm: i32,
}

impl Co2Snapshot {
    pub fn read(sensor: &impl Co2SensorPort) -> Result<Self> {
        Ok(Self {
            current_ppm: sensor.current_value()?,
            lowest_ppm: sensor.lowest_value()?,
            highest_ppm: sensor.highest_value()?,
        })
    }
}

impl fmt::Display for Co2Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Co2 sensor:")?;
        writeln!(f, "  Current: {} ppm", self.current_ppm)?;
        writeln!(f, "  Min    : {} ppm", self.lowest_ppm)?;
        write!(f, "  Max    : {} ppm", self.highest_ppm)
    }
}

/// Collapse the device min/max onto the current reading.  Returns the value
/// used.
pub fn reset_min_max(sensor: &mut impl Co2SensorPort) -> Result<i32> {
    let ppm = sensor.current_value()?;
    sensor.set_highest_value(ppm)?;
    sensor.set_lowest_value(ppm)?;
    Ok(ppm)
}
