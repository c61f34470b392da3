//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter     | Implements                 | Connects to                |
//! |-------------|----------------------------|----------------------------|
//! | `hardware`  | HardwarePort               | Yoctopuce hubs (HTTP)      |
//! |             | RelayPort, Co2SensorPort   |                            |
//! | `console`   | PromptPort                 | stdin / stdout             |
//! | `log_sink`  | EventSink                  | `log` facade               |
//! | `time`      | DelayNs                    | `std::thread::sleep`       |
//! | `yocto_api` | —                          | pure REST helpers          |

pub mod console;
#[cfg(feature = "hub")]
pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod yocto_api;
