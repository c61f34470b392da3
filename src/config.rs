//! Controller configuration
//!
//! Loaded once at startup from a JSON document.  Zone order in the file is
//! the order in which zones are actuated, so `zones` is kept as an ordered
//! list rather than a map.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::control::hysteresis::ThresholdPolicy;
use crate::error::{Error, Result};

/// Root of the configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub co2: Co2Config,
    /// Hub addresses to register (`usb`, a host, or a full URL).
    pub yoctohubs: Vec<String>,
    #[serde(deserialize_with = "ordered_zones", serialize_with = "zones_as_map")]
    pub zones: Vec<ZoneConfig>,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Co2Config {
    /// Opening threshold in ppm.  Windows close again 100 ppm below it.
    pub limit: i32,
}

/// One window zone and the two relays driving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    #[serde(skip)]
    pub name: String,
    pub descr: String,
    /// Relay that drives the close motion.
    pub up_relay: String,
    /// Relay that drives the open motion.
    pub down_relay: String,
}

/// Shortest pause allowed between two zone actuations.
pub const MIN_ZONE_SPACING_MS: u32 = 500;

/// Loop and actuation timing.  Every field is optional in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Poll interval while CO2 is above the opening threshold.
    pub fast_poll_ms: u32,
    /// Poll interval while CO2 is below the closing threshold.
    pub slow_poll_ms: u32,
    /// Pause after actuating each zone, at least [`MIN_ZONE_SPACING_MS`].
    pub zone_spacing_ms: u32,
    /// Open/close button press length.
    pub pulse_ms: u32,
    /// Button press length used when pairing with a remote.
    pub bind_pulse_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fast_poll_ms: 5_000,
            slow_poll_ms: 60_000,
            zone_spacing_ms: 500,
            pulse_ms: 200,
            bind_pulse_ms: 1_300,
        }
    }
}

impl ControllerConfig {
    /// Read, parse and validate the document at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Range and consistency checks, run before any hub is contacted.
    pub fn validate(&self) -> Result<()> {
        ThresholdPolicy::from_limit(self.co2.limit)?;
        if self.yoctohubs.is_empty() {
            return Err(Error::config("yoctohubs must list at least one hub"));
        }
        if self.yoctohubs.iter().any(|h| h.trim().is_empty()) {
            return Err(Error::config("yoctohubs contains an empty address"));
        }
        for zone in &self.zones {
            if zone.up_relay.trim().is_empty() || zone.down_relay.trim().is_empty() {
                return Err(Error::config(format!(
                    "zone {} has an empty relay id",
                    zone.name
                )));
            }
            if zone.up_relay == zone.down_relay {
                return Err(Error::config(format!(
                    "zone {} uses {} for both up and down",
                    zone.name, zone.up_relay
                )));
            }
        }
        self.timing.validate()
    }
}

impl TimingConfig {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("fast_poll_ms", self.fast_poll_ms),
            ("slow_poll_ms", self.slow_poll_ms),
            ("pulse_ms", self.pulse_ms),
            ("bind_pulse_ms", self.bind_pulse_ms),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| *v == 0) {
            return Err(Error::config(format!("timing.{name} must be > 0")));
        }
        if self.zone_spacing_ms < MIN_ZONE_SPACING_MS {
            return Err(Error::config(format!(
                "timing.zone_spacing_ms must be at least {MIN_ZONE_SPACING_MS}, got {}",
                self.zone_spacing_ms
            )));
        }
        if self.fast_poll_ms > self.slow_poll_ms {
            return Err(Error::config(
                "timing.fast_poll_ms must not exceed timing.slow_poll_ms",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ordered zone map
// ---------------------------------------------------------------------------

fn ordered_zones<'de, D>(deserializer: D) -> core::result::Result<Vec<ZoneConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ZonesVisitor;

    impl<'de> Visitor<'de> for ZonesVisitor {
        type Value = Vec<ZoneConfig>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of zone name to zone definition")
        }

        fn visit_map<A>(self, mut map: A) -> core::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut seen = HashSet::new();
            let mut zones = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, mut zone)) = map.next_entry::<String, ZoneConfig>()? {
                if !seen.insert(name.clone()) {
                    return Err(serde::de::Error::custom(format!("duplicate zone {name}")));
                }
                zone.name = name;
                zones.push(zone);
            }
            Ok(zones)
        }
    }

    deserializer.deserialize_map(ZonesVisitor)
}

fn zones_as_map<S>(zones: &[ZoneConfig], serializer: S) -> core::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_map(zones.iter().map(|z| (&z.name, z)))
}
