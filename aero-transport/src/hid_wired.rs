//! HID transport implementation for the keyboard's lighting interface

use hidapi::HidDevice;
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{self, FRAME_SIZE};
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// HID transport for a wired USB connection
///
/// Command frames go out as feature reports, image data as plain output
/// reports. Both are prefixed with report ID 0.
pub struct HidWiredTransport {
    /// `None` once closed
    device: Option<HidDevice>,
    /// Device information
    info: TransportDeviceInfo,
}

impl HidWiredTransport {
    /// Create a new wired transport from an opened HID device
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Some(device),
            info,
        }
    }

    fn device(&self) -> Result<&HidDevice, TransportError> {
        self.device.as_ref().ok_or(TransportError::Closed)
    }
}

impl Transport for HidWiredTransport {
    fn send_feature_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<(), TransportError> {
        let buf = protocol::with_report_id(frame);
        debug!("Sending feature report: {:02X?}", frame);
        self.device()?.send_feature_report(&buf)?;
        Ok(())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        let buf = protocol::with_report_id(chunk);
        let written = self.device()?.write(&buf)?;
        debug!("Wrote chunk: {} of {} bytes", written, buf.len());
        if written < buf.len() {
            return Err(TransportError::ShortWrite {
                expected: buf.len(),
                written,
            });
        }
        Ok(())
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn close(&mut self) -> Result<(), TransportError> {
        // HidDevice closes the handle on drop
        if self.device.take().is_some() {
            debug!("Closed {}", self.info);
        }
        Ok(())
    }
}
