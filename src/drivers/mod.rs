//! Actuator drivers.

pub mod zone;
