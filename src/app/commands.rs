//! Commands accepted by the controller.
//!
//! One command runs per process; the binary parses it from the command line
//! and hands it to [`Controller::execute`](super::service::Controller::execute).

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Open every targeted zone once.
    Open,
    /// Close every targeted zone once.
    Close,
    /// Run the CO2 hysteresis loop until the sensor goes offline.
    Auto,
    /// Print current, min and max CO2.
    Co2,
    /// Pair the first targeted zone with its remote.
    Bind,
}

impl AppCommand {
    pub const ALL: [Self; 5] = [Self::Open, Self::Close, Self::Auto, Self::Co2, Self::Bind];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Auto => "auto",
            Self::Co2 => "co2",
            Self::Bind => "bind",
        }
    }
}

impl fmt::Display for AppCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                Error::config(format!(
                    "unknown command {s:?}, expected one of open, close, auto, co2, bind"
                ))
            })
    }
}
