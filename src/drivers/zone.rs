//! Window zone driver (pair of momentary relays).
//!
//! Each zone is wired to one remote: the **down** relay presses the button
//! that opens the window, the **up** relay presses the one that closes it.
//! The mapping follows the remote's wiring, not the relay names.
//!
//! ## Safety contract
//!
//! Both relays must be online before the zone is used.  [`Zone::check_health`]
//! runs once when the registry is built; after that a failing pulse is
//! returned as an error and never retried.

use log::debug;

use crate::app::ports::RelayPort;
use crate::config::{TimingConfig, ZoneConfig};
use crate::error::{Error, Result};

/// Press lengths used by a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub press_ms: u32,
    pub bind_ms: u32,
}

impl From<&TimingConfig> for PulseTiming {
    fn from(t: &TimingConfig) -> Self {
        Self {
            press_ms: t.pulse_ms,
            bind_ms: t.bind_pulse_ms,
        }
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        (&TimingConfig::default()).into()
    }
}

pub struct Zone<R> {
    name: String,
    description: String,
    /// Drives the close motion.
    up: R,
    /// Drives the open motion.
    down: R,
    timing: PulseTiming,
}

impl<R: RelayPort> Zone<R> {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        up: R,
        down: R,
        timing: PulseTiming,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            up,
            down,
            timing,
        }
    }

    /// Build a zone from its config entry, resolving both relays through
    /// `find`.
    pub fn from_config(
        cfg: &ZoneConfig,
        timing: PulseTiming,
        mut find: impl FnMut(&str) -> Result<R>,
    ) -> Result<Self> {
        let up = find(&cfg.up_relay)?;
        let down = find(&cfg.down_relay)?;
        Ok(Self::new(&cfg.name, &cfg.descr, up, down, timing))
    }

    pub fn open(&mut self) -> Result<()> {
        debug!("zone {}: open pulse on {}", self.name, self.down.describe());
        self.down.pulse(self.timing.press_ms)
    }

    pub fn close(&mut self) -> Result<()> {
        debug!("zone {}: close pulse on {}", self.name, self.up.describe());
        self.up.pulse(self.timing.press_ms)
    }

    /// Fail with [`Error::ZoneHealth`] if either relay is offline.  The up
    /// relay is checked first.
    pub fn check_health(&self) -> Result<()> {
        for relay in [&self.up, &self.down] {
            if !relay.is_online() {
                return Err(Error::ZoneHealth {
                    zone: self.name.clone(),
                    description: self.description.clone(),
                    relay: relay.describe(),
                });
            }
        }
        Ok(())
    }

    /// Long press on the up relay, used while pairing with a remote.
    pub fn bind(&mut self) -> Result<()> {
        debug!("zone {}: bind pulse on {}", self.name, self.up.describe());
        self.up.pulse(self.timing.bind_ms)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn up_relay(&self) -> &R {
        &self.up
    }

    pub fn down_relay(&self) -> &R {
        &self.down
    }
}
