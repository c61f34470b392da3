//! Controller — the hysteresis loop and the one-shot commands.
//!
//! [`Controller`] owns the zone registry, the CO2 sensor handle, the
//! threshold policy and the session state.  Delays, events and operator
//! prompts are injected at call sites.
//!
//! ```text
//!  Co2SensorPort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                    │      Controller       │
//!   ZoneRegistry ◀── │ policy · VentState    │ ◀── DelayNs
//!                    └──────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::{ControllerConfig, TimingConfig};
use crate::control::hysteresis::ThresholdPolicy;
use crate::error::{Error, Result};
use crate::fsm::{self, Actuation, PollRate, Step, VentState};
use crate::sensors::{self, Co2Snapshot};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Co2SensorPort, EventSink, HardwarePort, PromptPort, RelayPort};
use super::registry::ZoneRegistry;

/// Operator instructions shown before the pairing pulse.
pub const BIND_PROMPTS: [&str; 2] = [
    "Press the config button on the Velux remote",
    "Press the reset button on the KLF 200 for 1 second.\nThe LED should be flashing white",
];

/// Result of a one-shot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    Report(Co2Snapshot),
}

pub struct Controller<R, S> {
    registry: ZoneRegistry<R>,
    sensor: S,
    policy: ThresholdPolicy,
    timing: TimingConfig,
    state: VentState,
    poll_ms: u32,
}

impl<R: RelayPort, S: Co2SensorPort> Controller<R, S> {
    /// Validate the policy, locate the sensor, then build and health-check
    /// the targeted zones.  Nothing is actuated.
    pub fn from_config<H>(config: &ControllerConfig, targets: &[String], hw: &H) -> Result<Self>
    where
        H: HardwarePort<Relay = R, Sensor = S>,
    {
        let policy = ThresholdPolicy::from_limit(config.co2.limit)?;
        let sensor = hw.first_co2_sensor()?;
        let registry = ZoneRegistry::from_config(config, targets, hw)?;
        Ok(Self::new(registry, sensor, policy, config.timing))
    }

    pub fn new(
        registry: ZoneRegistry<R>,
        sensor: S,
        policy: ThresholdPolicy,
        timing: TimingConfig,
    ) -> Self {
        Self {
            registry,
            sensor,
            policy,
            timing,
            state: VentState::Closed,
            poll_ms: timing.fast_poll_ms,
        }
    }

    // ── Commands ──────────────────────────────────────────────

    /// Run one command to completion.
    pub fn execute(
        &mut self,
        cmd: AppCommand,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
        prompt: &mut impl PromptPort,
    ) -> Result<CommandOutcome> {
        match cmd {
            AppCommand::Open => self.drive(VentState::Open, delay, sink)?,
            AppCommand::Close => self.drive(VentState::Closed, delay, sink)?,
            AppCommand::Auto => self.run_auto(delay, sink)?,
            AppCommand::Co2 => return self.co2_snapshot().map(CommandOutcome::Report),
            AppCommand::Bind => self.bind(prompt)?,
        }
        Ok(CommandOutcome::Done)
    }

    /// Hysteresis loop.  Returns once the sensor goes offline, after closing
    /// the windows if they were open.
    pub fn run_auto(&mut self, delay: &mut impl DelayNs, sink: &mut impl EventSink) -> Result<()> {
        info!("CO2 limit is set to {} ppm", self.policy.open_above());
        sink.emit(&AppEvent::AutoStarted {
            open_above: self.policy.open_above(),
            close_below: self.policy.close_below(),
        });

        self.drive(VentState::Closed, delay, sink)?;
        self.poll_ms = self.timing.fast_poll_ms;

        while self.sensor.is_online() {
            self.poll_once(delay, sink)?;
            delay.delay_ms(self.poll_ms);
        }

        warn!("CO2 sensor offline, leaving automatic mode");
        sink.emit(&AppEvent::SensorLost { state: self.state });
        if self.state == VentState::Open {
            self.drive(VentState::Closed, delay, sink)?;
        }
        Ok(())
    }

    /// Read the sensor once and apply the resulting step.  Does not sleep
    /// the poll interval.
    pub fn poll_once(
        &mut self,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<Step> {
        let ppm = self.sensor.current_value()?;
        debug!("CO2 value: {ppm} ppm");

        let step = fsm::step(self.state, ppm, &self.policy);
        match step.actuation {
            Some(Actuation::OpenAll) => {
                info!(
                    "CO2 concentration ({ppm} ppm) is beyond the {} ppm limit: opening windows",
                    self.policy.open_above()
                );
                self.drive(VentState::Open, delay, sink)?;
            }
            Some(Actuation::CloseAll) => {
                info!(
                    "CO2 concentration ({ppm} ppm) is below {} ppm: closing windows",
                    self.policy.close_below()
                );
                self.drive(VentState::Closed, delay, sink)?;
            }
            None => {}
        }
        if let Some(rate) = step.rate {
            self.poll_ms = match rate {
                PollRate::Fast => self.timing.fast_poll_ms,
                PollRate::Slow => self.timing.slow_poll_ms,
            };
        }

        sink.emit(&AppEvent::Reading {
            ppm,
            state: self.state,
            next_poll_ms: self.poll_ms,
        });
        Ok(step)
    }

    /// Pulse every zone towards `target` and record the new state.
    ///
    /// Always actuates; callers that must not repeat a pulse check the state
    /// first.
    pub fn drive(
        &mut self,
        target: VentState,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match target {
            VentState::Open => self.registry.open_all(delay)?,
            VentState::Closed => self.registry.close_all(delay)?,
        }
        sink.emit(&AppEvent::ZonesActuated {
            state: target,
            zones: self.registry.len(),
        });

        let from = self.state;
        self.state = target;
        if from != target {
            sink.emit(&AppEvent::StateChanged { from, to: target });
        }
        Ok(())
    }

    pub fn co2_snapshot(&self) -> Result<Co2Snapshot> {
        Co2Snapshot::read(&self.sensor)
    }

    /// Reset the sensor's recorded min/max to the current reading.
    pub fn reset_min_max(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let ppm = sensors::reset_min_max(&mut self.sensor)?;
        sink.emit(&AppEvent::MinMaxReset { ppm });
        Ok(())
    }

    /// Pairing procedure: wait for the operator twice, then long-press the
    /// first targeted zone.
    pub fn bind(&mut self, prompt: &mut impl PromptPort) -> Result<()> {
        let no_zone = || Error::config("bind needs at least one targeted zone");
        if self.registry.is_empty() {
            return Err(no_zone());
        }
        for message in BIND_PROMPTS {
            prompt.wait_for_operator(message)?;
        }
        let zone = self.registry.first_mut().ok_or_else(no_zone)?;
        info!("bind {}", zone.name());
        zone.bind()
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> VentState {
        self.state
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &ZoneRegistry<R> {
        &self.registry
    }
}
