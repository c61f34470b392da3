//! Mock hardware adapter for integration tests.
//!
//! Relays, the sensor and the prompt all append to one shared [`Journal`],
//! so tests can assert on the exact interleaving of reads, prompts and
//! pulses without touching a hub.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use co2vent::app::events::AppEvent;
use co2vent::app::ports::{Co2SensorPort, EventSink, HardwarePort, PromptPort, RelayPort};
use co2vent::config::{Co2Config, ControllerConfig, TimingConfig, ZoneConfig};
use co2vent::{Error, Result};
use embedded_hal::delay::DelayNs;

// ── Journal ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Pulse { relay: String, ms: u32 },
    SensorRead(i32),
    Prompt(String),
}

pub type Journal = Rc<RefCell<Vec<Call>>>;

pub fn pulses(journal: &Journal) -> Vec<String> {
    journal
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Pulse { relay, .. } => Some(relay.clone()),
            _ => None,
        })
        .collect()
}

pub fn sensor_reads(journal: &Journal) -> usize {
    journal
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::SensorRead(_)))
        .count()
}

// ── FakeRelay ─────────────────────────────────────────────────

pub struct FakeRelay {
    pub id: String,
    pub online: bool,
    pub failing: bool,
    journal: Journal,
}

impl RelayPort for FakeRelay {
    fn pulse(&mut self, duration_ms: u32) -> Result<()> {
        if self.failing {
            return Err(Error::Actuation {
                relay: self.id.clone(),
                reason: "device unplugged".into(),
            });
        }
        self.journal.borrow_mut().push(Call::Pulse {
            relay: self.id.clone(),
            ms: duration_ms,
        });
        Ok(())
    }

    fn is_online(&self) -> bool {
        self.online
    }

    fn describe(&self) -> String {
        format!("Relay({0})={0}", self.id)
    }
}

// ── FakeSensor ────────────────────────────────────────────────

/// Online while scripted readings remain; each `current_value` consumes
/// one.  Once the script is exhausted it keeps returning the last value.
pub struct FakeSensor {
    script: RefCell<VecDeque<i32>>,
    last: RefCell<i32>,
    lowest: i32,
    highest: i32,
    journal: Journal,
}

impl Co2SensorPort for FakeSensor {
    fn is_online(&self) -> bool {
        !self.script.borrow().is_empty()
    }

    fn current_value(&self) -> Result<i32> {
        if let Some(v) = self.script.borrow_mut().pop_front() {
            *self.last.borrow_mut() = v;
        }
        let v = *self.last.borrow();
        self.journal.borrow_mut().push(Call::SensorRead(v));
        Ok(v)
    }

    fn lowest_value(&self) -> Result<i32> {
        Ok(self.lowest)
    }

    fn highest_value(&self) -> Result<i32> {
        Ok(self.highest)
    }

    fn set_lowest_value(&mut self, ppm: i32) -> Result<()> {
        self.lowest = ppm;
        Ok(())
    }

    fn set_highest_value(&mut self, ppm: i32) -> Result<()> {
        self.highest = ppm;
        Ok(())
    }
}

// ── FakeHardware ──────────────────────────────────────────────

pub struct FakeHardware {
    pub journal: Journal,
    offline: Vec<String>,
    failing: Vec<String>,
    readings: Vec<i32>,
    has_sensor: bool,
    pub lowest: i32,
    pub highest: i32,
}

impl FakeHardware {
    pub fn new(readings: &[i32]) -> Self {
        Self {
            journal: Rc::default(),
            offline: Vec::new(),
            failing: Vec::new(),
            readings: readings.to_vec(),
            has_sensor: true,
            lowest: 400,
            highest: 1500,
        }
    }

    pub fn with_offline_relay(mut self, id: &str) -> Self {
        self.offline.push(id.to_string());
        self
    }

    pub fn with_failing_relay(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }

    pub fn without_sensor(mut self) -> Self {
        self.has_sensor = false;
        self
    }
}

impl HardwarePort for FakeHardware {
    type Relay = FakeRelay;
    type Sensor = FakeSensor;

    fn find_relay(&self, hardware_id: &str) -> Result<FakeRelay> {
        Ok(FakeRelay {
            id: hardware_id.to_string(),
            online: !self.offline.iter().any(|id| id == hardware_id),
            failing: self.failing.iter().any(|id| id == hardware_id),
            journal: Rc::clone(&self.journal),
        })
    }

    fn first_co2_sensor(&self) -> Result<FakeSensor> {
        if !self.has_sensor {
            return Err(Error::NoCo2Sensor);
        }
        Ok(FakeSensor {
            script: RefCell::new(self.readings.iter().copied().collect()),
            last: RefCell::new(self.readings.first().copied().unwrap_or(0)),
            lowest: self.lowest,
            highest: self.highest,
            journal: Rc::clone(&self.journal),
        })
    }
}

// ── RecordingDelay ────────────────────────────────────────────

/// Never sleeps; records every requested delay in milliseconds.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub delays_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── ScriptedPrompt ────────────────────────────────────────────

pub struct ScriptedPrompt {
    journal: Journal,
}

impl ScriptedPrompt {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
        }
    }
}

impl PromptPort for ScriptedPrompt {
    fn wait_for_operator(&mut self, message: &str) -> Result<()> {
        self.journal
            .borrow_mut()
            .push(Call::Prompt(message.to_string()));
        Ok(())
    }
}

// ── Config builders ───────────────────────────────────────────

pub fn zone(name: &str) -> ZoneConfig {
    ZoneConfig {
        name: name.to_string(),
        descr: format!("{name} roof window"),
        up_relay: format!("{name}.up"),
        down_relay: format!("{name}.down"),
    }
}

pub fn config(limit: i32, zones: &[&str]) -> ControllerConfig {
    ControllerConfig {
        co2: Co2Config { limit },
        yoctohubs: vec!["usb".to_string()],
        zones: zones.iter().map(|z| zone(z)).collect(),
        timing: TimingConfig::default(),
    }
}

pub fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
