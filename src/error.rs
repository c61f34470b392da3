//! Unified error types for the controller.
//!
//! Every fallible operation funnels into [`Error`], so the binary has one
//! place that turns a failure into a message and a non-zero exit.  Nothing in
//! the library terminates the process itself.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON or misses a field.
    #[error("cannot parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value failed validation.
    #[error("invalid config: {0}")]
    Config(String),

    /// A configured hub did not answer at registration time.
    #[error("unable to connect to {hub}: {reason}")]
    HubUnreachable { hub: String, reason: String },

    /// No CO2 sensor is attached to any registered hub.
    #[error("no CO2 sensor found, plug a Yocto-CO2 or Yocto-CO2-V2 into a registered hub")]
    NoCo2Sensor,

    /// A relay of a targeted zone was offline at registration time.
    #[error("relay {relay} for zone {zone} ({description}) is not online")]
    ZoneHealth {
        zone: String,
        description: String,
        relay: String,
    },

    /// A relay pulse failed while the controller was running.
    #[error("actuation failed on {relay}: {reason}")]
    Actuation { relay: String, reason: String },

    /// The CO2 sensor answered with an error or an unreadable value.
    #[error("CO2 sensor: {0}")]
    Sensor(String),

    /// The operator console could not be used.
    #[error("console: {0}")]
    Console(#[from] std::io::Error),

    /// The operator console closed before a prompt was acknowledged.
    #[error("console closed before the operator confirmed")]
    ConsoleClosed,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Coarse category of an [`Error`], matching where in the lifecycle it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing configuration. Raised before any hardware access.
    Configuration,
    /// Hub unreachable or no sensor discoverable.
    HardwareRegistration,
    /// A zone relay was offline at startup.
    ZoneHealth,
    /// A hardware call failed during operation.
    RuntimeActuation,
    /// The interactive pairing procedure was interrupted.
    Operator,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::Config(_) => {
                ErrorKind::Configuration
            }
            Self::HubUnreachable { .. } | Self::NoCo2Sensor => ErrorKind::HardwareRegistration,
            Self::ZoneHealth { .. } => ErrorKind::ZoneHealth,
            Self::Actuation { .. } | Self::Sensor(_) => ErrorKind::RuntimeActuation,
            Self::Console(_) | Self::ConsoleClosed => ErrorKind::Operator,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
