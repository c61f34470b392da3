//! Application core — controller logic, zero I/O.
//!
//! All interaction with hubs, relays, the sensor and the operator happens
//! through the **port traits** defined in [`ports`], so everything here runs
//! against in-memory fakes in tests.

pub mod commands;
pub mod events;
pub mod ports;
pub mod registry;
pub mod service;
