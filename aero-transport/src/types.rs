//! Common types for transport layer

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::device;

/// Device identification information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// HID interface number (-1 when the backend cannot tell)
    pub interface_number: i32,
    /// Device path or identifier (transport-specific)
    pub device_path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Manufacturer name if available
    pub manufacturer: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl fmt::Display for TransportDeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:04x} interface {} ({})",
            self.vid, self.pid, self.interface_number, self.device_path
        )?;
        if let Some(name) = &self.product_name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

/// Which HID interface to open
///
/// A device matches when vendor ID, product ID and interface number are all
/// equal. The first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSelector {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface: i32,
}

impl Default for DeviceSelector {
    fn default() -> Self {
        Self {
            vendor_id: device::VENDOR_ID,
            product_id: device::PRODUCT_ID,
            interface: device::INTERFACE_LIGHTING,
        }
    }
}

impl DeviceSelector {
    /// Check whether a HID interface satisfies this selector
    pub fn matches(&self, vid: u16, pid: u16, interface_number: i32) -> bool {
        self.matches_device(vid, pid) && self.interface == interface_number
    }

    /// Check vendor/product only (any interface)
    pub fn matches_device(&self, vid: u16, pid: u16) -> bool {
        self.vendor_id == vid && self.product_id == pid
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:04x} interface {}",
            self.vendor_id, self.product_id, self.interface
        )
    }
}
