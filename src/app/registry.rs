//! Zone registry — the targeted subset of configured zones.
//!
//! Built once at startup.  Every selected zone is health-checked while the
//! registry is built, so a missing relay stops the process before any
//! sensor is read or any window moves.
//!
//! Zones are actuated one after the other with a pause after each, never
//! concurrently: the remotes share one hub link and the motors draw current
//! at start-up.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::ControllerConfig;
use crate::drivers::zone::{PulseTiming, Zone};
use crate::error::Result;

use super::ports::{HardwarePort, RelayPort};

/// Target name selecting every zone.
pub const ALL_ZONES: &str = "All";

/// `true` when `targets` is empty or starts with [`ALL_ZONES`].
pub fn selects_all(targets: &[String]) -> bool {
    targets.first().is_none_or(|t| t == ALL_ZONES)
}

pub struct ZoneRegistry<R> {
    zones: Vec<Zone<R>>,
    spacing_ms: u32,
}

impl<R: RelayPort> ZoneRegistry<R> {
    /// Select zones from `config` by `targets` (config order) and check the
    /// health of each one.
    pub fn from_config<H>(config: &ControllerConfig, targets: &[String], hw: &H) -> Result<Self>
    where
        H: HardwarePort<Relay = R>,
    {
        let all = selects_all(targets);
        if !all {
            for t in targets {
                if !config.zones.iter().any(|z| &z.name == t) {
                    warn!("no zone named {t:?} in config, ignored");
                }
            }
        }

        let timing = PulseTiming::from(&config.timing);
        let mut zones = Vec::new();
        for cfg in config
            .zones
            .iter()
            .filter(|z| all || targets.contains(&z.name))
        {
            let zone = Zone::from_config(cfg, timing, |id| hw.find_relay(id))?;
            zone.check_health()?;
            zones.push(zone);
        }

        let registry = Self::new(zones, config.timing.zone_spacing_ms);
        info!("targeted zones: {}", registry.names().join(" "));
        Ok(registry)
    }

    pub fn new(zones: Vec<Zone<R>>, spacing_ms: u32) -> Self {
        Self { zones, spacing_ms }
    }

    /// Open every zone in order, pausing after each one.
    pub fn open_all(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        for zone in &mut self.zones {
            zone.open()?;
            delay.delay_ms(self.spacing_ms);
        }
        Ok(())
    }

    /// Close every zone in order, pausing after each one.
    pub fn close_all(&mut self, delay: &mut impl DelayNs) -> Result<()> {
        for zone in &mut self.zones {
            zone.close()?;
            delay.delay_ms(self.spacing_ms);
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.zones.iter().map(Zone::name).collect()
    }

    pub fn first_mut(&mut self) -> Option<&mut Zone<R>> {
        self.zones.first_mut()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
