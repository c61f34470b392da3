//! Two-threshold CO2 policy
//!
//! Both thresholds derive from the single configured limit: windows open
//! above `limit` and close below `limit - 100`.  The gap is what keeps
//! sensor noise around one setpoint from cycling the motors.

use crate::error::{Error, Result};

/// Distance between the opening and the closing threshold (ppm).
pub const HYSTERESIS_GAP_PPM: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    open_above: i32,
    close_below: i32,
}

impl ThresholdPolicy {
    /// Build the policy from the configured limit.
    ///
    /// A limit at or below the gap would put the closing threshold at or
    /// below zero ppm, so it is rejected.
    pub fn from_limit(limit: i32) -> Result<Self> {
        if limit <= HYSTERESIS_GAP_PPM {
            return Err(Error::config(format!(
                "co2.limit must be greater than {HYSTERESIS_GAP_PPM} ppm, got {limit}"
            )));
        }
        Ok(Self {
            open_above: limit,
            close_below: limit - HYSTERESIS_GAP_PPM,
        })
    }

    pub fn open_above(&self) -> i32 {
        self.open_above
    }

    pub fn close_below(&self) -> i32 {
        self.close_below
    }

    /// Strictly above the opening threshold.
    pub fn wants_open(&self, ppm: i32) -> bool {
        ppm > self.open_above
    }

    /// Strictly below the closing threshold.
    pub fn wants_closed(&self, ppm: i32) -> bool {
        ppm < self.close_below
    }
}
