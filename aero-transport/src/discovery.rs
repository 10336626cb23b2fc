//! Device discovery for Aero keyboards
//!
//! Opening must not claim the device exclusively: the keyboard's other
//! interfaces keep serving keystrokes while lighting commands are sent. The
//! `hidapi` crate's default Linux backend talks to `/dev/hidraw*`, which leaves
//! the kernel driver bound. The libusb backend detaches it and must not be used.

use hidapi::HidApi;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::hid_wired::HidWiredTransport;
use crate::types::{DeviceSelector, TransportDeviceInfo};

/// HID device discovery
pub struct HidDiscovery {
    api: HidApi,
}

impl HidDiscovery {
    /// Initialize the HID backend and enumerate devices
    pub fn new() -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        Ok(Self { api })
    }

    /// List every HID interface belonging to the selected vendor/product,
    /// whatever its interface number
    pub fn list_devices(&self, selector: &DeviceSelector) -> Vec<TransportDeviceInfo> {
        self.api
            .device_list()
            .filter(|d| selector.matches_device(d.vendor_id(), d.product_id()))
            .map(device_info)
            .collect()
    }

    /// Open the first interface matching the selector
    pub fn open(&self, selector: &DeviceSelector) -> Result<HidWiredTransport, TransportError> {
        let raw = self.find_raw(selector)?;
        let info = device_info(raw);
        debug!("Opening {}", info);
        let device = raw.open_device(&self.api)?;
        info!("Opened {}", info);
        Ok(HidWiredTransport::new(device, info))
    }

    fn find_raw(&self, selector: &DeviceSelector) -> Result<&hidapi::DeviceInfo, TransportError> {
        self.api
            .device_list()
            .find(|d| selector.matches(d.vendor_id(), d.product_id(), d.interface_number()))
            .ok_or_else(|| TransportError::DeviceNotFound(selector.to_string()))
    }
}

fn device_info(d: &hidapi::DeviceInfo) -> TransportDeviceInfo {
    TransportDeviceInfo {
        vid: d.vendor_id(),
        pid: d.product_id(),
        interface_number: d.interface_number(),
        device_path: d.path().to_string_lossy().to_string(),
        serial: d.serial_number().map(|s| s.to_string()),
        manufacturer: d.manufacturer_string().map(|s| s.to_string()),
        product_name: d.product_string().map(|s| s.to_string()),
    }
}
