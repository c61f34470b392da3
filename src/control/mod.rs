//! Control policies.
//!
//! Two-threshold hysteresis: a window is either open or closed.

pub mod hysteresis;
