//! Transport abstraction layer for Aero keyboard lighting control
//!
//! The lighting controller is driven through two HID paths:
//!
//! - feature reports, carrying fixed 8-byte command frames
//! - output reports (plain writes), carrying 64-byte chunks of a custom image
//!
//! Everything above this crate talks to the device through [`Transport`], so
//! the HID backend can be swapped (or replaced by a recorder in tests) without
//! touching the protocol code.

pub mod error;
pub mod printer;
pub mod protocol;
pub mod types;

mod discovery;
mod hid_wired;

pub use discovery::HidDiscovery;
pub use error::TransportError;
pub use hid_wired::HidWiredTransport;
pub use printer::{FrameDescriber, PacketFilter, PrinterConfig, PrinterTransport};
pub use types::{DeviceSelector, TransportDeviceInfo};

use protocol::FRAME_SIZE;

/// The core transport trait - all backends implement this
///
/// Calls are blocking: each one returns once the backend has acknowledged or
/// rejected the transfer. A transport is owned by exactly one caller, hence the
/// `&mut self` receivers.
pub trait Transport: Send {
    /// Send one command frame as a HID feature report
    ///
    /// The frame is passed without report ID; backends add their own framing.
    fn send_feature_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<(), TransportError>;

    /// Write one chunk of bulk data to the device's output path
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;

    /// Release the device handle
    ///
    /// Closing twice is not an error. Any call after close fails with
    /// [`TransportError::Closed`].
    fn close(&mut self) -> Result<(), TransportError>;
}

/// Type alias for a boxed transport
pub type BoxedTransport = Box<dyn Transport>;

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_feature_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<(), TransportError> {
        (**self).send_feature_report(frame)
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        (**self).write_chunk(chunk)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        (**self).device_info()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }
}
