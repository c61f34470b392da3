//! Pure helpers for the Yoctopuce hub REST API.
//!
//! Hubs (YoctoHub-Ethernet, YoctoHub-Wireless, or a VirtualHub exposing USB
//! devices) serve every device function as a JSON document under
//! `/bySerial/<serial>/api/<function>.json`, and list the functions they
//! host in `/api/services/yellowPages.json`.  Nothing here performs I/O.

use std::collections::HashMap;

use serde::Deserialize;

/// Default port of YoctoHubs and VirtualHub.
pub const DEFAULT_PORT: u16 = 4444;

/// Yellow-pages class of relay functions.
pub const RELAY_CLASS: &str = "Relay";

/// Yellow-pages class of CO2 sensor functions.
pub const CO2_CLASS: &str = "CarbonDioxide";

/// Sensor attributes are exchanged as 16.16 fixed point.
const FIXED_POINT_SCALE: f64 = 65_536.0;

/// Turn a configured hub address into a base URL without trailing slash.
///
/// `usb` means the local VirtualHub.  Bare hosts get the default port.
pub fn hub_base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.eq_ignore_ascii_case("usb") {
        return format!("http://127.0.0.1:{DEFAULT_PORT}");
    }
    if address.contains("://") {
        return address.to_string();
    }
    let has_port = address
        .rsplit_once(':')
        .is_some_and(|(_, port)| port.parse::<u16>().is_ok());
    if has_port {
        format!("http://{address}")
    } else {
        format!("http://{address}:{DEFAULT_PORT}")
    }
}

/// One function entry of a hub's yellow pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEntry {
    /// `SERIAL.functionId`, e.g. `RELAYLO1-27EAB.relay1`.
    pub hardware_id: String,
    #[serde(default)]
    pub logical_name: String,
}

/// Function class name → functions of that class.
pub type YellowPages = HashMap<String, Vec<FunctionEntry>>;

impl FunctionEntry {
    /// Device serial number part of the hardware id.
    pub fn serial(&self) -> &str {
        self.hardware_id
            .split_once('.')
            .map_or(self.hardware_id.as_str(), |(serial, _)| serial)
    }

    /// Function id part of the hardware id.
    pub fn function_id(&self) -> &str {
        self.hardware_id
            .split_once('.')
            .map_or("", |(_, function)| function)
    }

    /// Whether `id` designates this function: by hardware id, by logical
    /// name, or by `SERIAL.logicalName`.
    pub fn matches(&self, id: &str) -> bool {
        if self.hardware_id == id {
            return true;
        }
        if self.logical_name.is_empty() {
            return false;
        }
        self.logical_name == id
            || id
                .split_once('.')
                .is_some_and(|(serial, name)| serial == self.serial() && name == self.logical_name)
    }

    /// REST path of the function, relative to the hub base URL.
    pub fn api_path(&self) -> String {
        format!("/bySerial/{}/api/{}", self.serial(), self.function_id())
    }
}

/// Locate `id` among the functions of `class`.
pub fn find_function<'a>(pages: &'a YellowPages, class: &str, id: &str) -> Option<&'a FunctionEntry> {
    pages.get(class)?.iter().find(|f| f.matches(id))
}

/// First function of `class`, in hub order.
pub fn first_function<'a>(pages: &'a YellowPages, class: &str) -> Option<&'a FunctionEntry> {
    pages.get(class)?.first()
}

/// Decode a 16.16 fixed-point attribute to whole ppm.
pub fn decode_fixed_point(raw: f64) -> i32 {
    (raw / FIXED_POINT_SCALE).round() as i32
}

/// Encode whole ppm as a 16.16 fixed-point attribute value.
pub fn encode_fixed_point(ppm: i32) -> i64 {
    i64::from(ppm) * FIXED_POINT_SCALE as i64
}

/// Attribute value that makes a relay pulse for `duration_ms`.
pub fn pulse_timer_value(duration_ms: u32) -> String {
    format!("0:{duration_ms}")
}

/// Yoctopuce-style description: `Class(name)=SERIAL.function`.
pub fn describe(class: &str, id: &str, entry: Option<&FunctionEntry>) -> String {
    match entry {
        Some(f) if !f.logical_name.is_empty() => {
            format!("{class}({})={}", f.logical_name, f.hardware_id)
        }
        Some(f) => format!("{class}({0})={0}", f.hardware_id),
        None => format!("{class}({id})=unresolved"),
    }
}
