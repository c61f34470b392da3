//! co2vent library.
//!
//! Everything except the hub adapter is pure logic behind port traits and
//! builds without the `hub` feature, for host testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod sensors;

pub use error::{Error, ErrorKind, Result};
