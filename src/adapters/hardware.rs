//! Hub adapter — bridges Yoctopuce hubs to the domain port traits.
//!
//! [`HubSession`] registers every configured hub, resolves relays and the
//! CO2 sensor from the hubs' yellow pages, and hands out [`HubRelay`] and
//! [`HubCo2Sensor`] handles.  This is the only module that talks to real
//! hardware.
//!
//! The hub REST API keeps no server-side session: registering a hub only
//! fetches its yellow pages.  Dropping the session closes the agent's
//! pooled connections and logs the teardown, on every exit path of the
//! binary.

use std::time::Duration;

use log::{debug, info};

use super::yocto_api::{self, FunctionEntry, YellowPages, CO2_CLASS, RELAY_CLASS};
use crate::app::ports::{Co2SensorPort, HardwarePort, RelayPort};
use crate::error::{Error, Result};

/// Per-request timeout.  A hub that does not answer in time counts as
/// offline rather than blocking the loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One registered hub and the functions it advertised at registration.
struct Hub {
    base_url: String,
    pages: YellowPages,
}

/// Registered hubs.  Owns the HTTP agent shared by all handles.
pub struct HubSession {
    agent: ureq::Agent,
    hubs: Vec<Hub>,
}

impl HubSession {
    /// Connect to every address and load its yellow pages.  Fails on the
    /// first hub that does not answer.
    pub fn register(addresses: &[String]) -> Result<Self> {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        let mut hubs = Vec::with_capacity(addresses.len());

        for address in addresses {
            let base_url = yocto_api::hub_base_url(address);
            let unreachable = |reason: String| Error::HubUnreachable {
                hub: address.clone(),
                reason,
            };

            get_text(&agent, &format!("{base_url}/api/module.json")).map_err(unreachable)?;
            let body = get_text(&agent, &format!("{base_url}/api/services/yellowPages.json"))
                .map_err(unreachable)?;
            let pages: YellowPages = serde_json::from_str(&body)
                .map_err(|e| unreachable(format!("bad yellow pages: {e}")))?;

            info!("registered hub {address} ({base_url})");
            debug!(
                "{address}: {} relay(s), {} CO2 sensor(s)",
                pages.get(RELAY_CLASS).map_or(0, Vec::len),
                pages.get(CO2_CLASS).map_or(0, Vec::len)
            );
            hubs.push(Hub { base_url, pages });
        }

        Ok(Self { agent, hubs })
    }

    fn locate(&self, class: &str, id: &str) -> Option<(String, FunctionEntry)> {
        self.hubs.iter().find_map(|hub| {
            yocto_api::find_function(&hub.pages, class, id)
                .map(|f| (hub.base_url.clone(), f.clone()))
        })
    }
}

impl Drop for HubSession {
    fn drop(&mut self) {
        debug!("closing session with {} hub(s)", self.hubs.len());
    }
}

impl HardwarePort for HubSession {
    type Relay = HubRelay;
    type Sensor = HubCo2Sensor;

    fn find_relay(&self, hardware_id: &str) -> Result<HubRelay> {
        let located = self.locate(RELAY_CLASS, hardware_id);
        let description =
            yocto_api::describe(RELAY_CLASS, hardware_id, located.as_ref().map(|(_, f)| f));
        Ok(HubRelay {
            agent: self.agent.clone(),
            url: located.map(|(base, f)| format!("{base}{}", f.api_path())),
            description,
        })
    }

    fn first_co2_sensor(&self) -> Result<HubCo2Sensor> {
        let (base, entry) = self
            .hubs
            .iter()
            .find_map(|hub| {
                yocto_api::first_function(&hub.pages, CO2_CLASS)
                    .map(|f| (hub.base_url.clone(), f.clone()))
            })
            .ok_or(Error::NoCo2Sensor)?;
        info!("using CO2 sensor {}", entry.hardware_id);
        Ok(HubCo2Sensor {
            agent: self.agent.clone(),
            url: format!("{base}{}", entry.api_path()),
        })
    }
}

// ── Relay handle ──────────────────────────────────────────────

pub struct HubRelay {
    agent: ureq::Agent,
    /// `None` when no hub advertised the relay.
    url: Option<String>,
    description: String,
}

impl RelayPort for HubRelay {
    fn pulse(&mut self, duration_ms: u32) -> Result<()> {
        let actuation = |reason: String| Error::Actuation {
            relay: self.description.clone(),
            reason,
        };
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| actuation("relay not found on any hub".into()))?;
        let value = yocto_api::pulse_timer_value(duration_ms);
        get_text(&self.agent, &format!("{url}?pulseTimer={value}")).map_err(actuation)?;
        Ok(())
    }

    fn is_online(&self) -> bool {
        self.url
            .as_ref()
            .is_some_and(|url| get_text(&self.agent, &format!("{url}.json")).is_ok())
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

// ── CO2 sensor handle ─────────────────────────────────────────

pub struct HubCo2Sensor {
    agent: ureq::Agent,
    url: String,
}

impl HubCo2Sensor {
    fn read_attribute(&self, name: &str) -> Result<i32> {
        let body = get_text(&self.agent, &format!("{}.json", self.url)).map_err(Error::Sensor)?;
        let doc: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| Error::Sensor(e.to_string()))?;
        doc.get(name)
            .and_then(serde_json::Value::as_f64)
            .map(yocto_api::decode_fixed_point)
            .ok_or_else(|| Error::Sensor(format!("missing attribute {name}")))
    }

    fn write_attribute(&self, name: &str, ppm: i32) -> Result<()> {
        let raw = yocto_api::encode_fixed_point(ppm);
        get_text(&self.agent, &format!("{}?{name}={raw}", self.url)).map_err(Error::Sensor)?;
        Ok(())
    }
}

impl Co2SensorPort for HubCo2Sensor {
    fn is_online(&self) -> bool {
        get_text(&self.agent, &format!("{}.json", self.url)).is_ok()
    }

    fn current_value(&self) -> Result<i32> {
        self.read_attribute("currentValue")
    }

    fn lowest_value(&self) -> Result<i32> {
        self.read_attribute("lowestValue")
    }

    fn highest_value(&self) -> Result<i32> {
        self.read_attribute("highestValue")
    }

    fn set_lowest_value(&mut self, ppm: i32) -> Result<()> {
        self.write_attribute("lowestValue", ppm)
    }

    fn set_highest_value(&mut self, ppm: i32) -> Result<()> {
        self.write_attribute("highestValue", ppm)
    }
}

// ── HTTP ──────────────────────────────────────────────────────

fn get_text(agent: &ureq::Agent, url: &str) -> core::result::Result<String, String> {
    let response = agent
        .get(url)
        .call()
        .map_err(|e| format!("GET {url}: {e}"))?;
    response
        .into_string()
        .map_err(|e| format!("reading {url}: {e}"))
}
