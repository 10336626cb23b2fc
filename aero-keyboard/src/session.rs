//! Device upload sequencing
//!
//! A [`KeyboardSession`] owns one open transport and turns lighting requests
//! into the exact transfer sequence the controller expects:
//!
//! - preset: one feature report
//! - custom image: begin frame, 8 x 64-byte chunk writes, commit frame
//!
//! Nothing is retried. Once the begin frame has been accepted the controller's
//! volatile image buffer is being overwritten and cannot be read back, so a
//! failure past that point leaves the session [`SessionState::Failed`] and is
//! reported as [`KeyboardError::UploadAborted`].

use std::fmt;

use aero_transport::protocol::IMAGE_SIZE;
use aero_transport::{
    DeviceSelector, HidDiscovery, HidWiredTransport, Transport, TransportDeviceInfo,
    TransportError,
};
use tracing::{debug, info, warn};

use crate::error::KeyboardError;
use crate::frame::{Color, Frame, Mode};
use crate::image::CustomImage;

/// Session lifecycle
///
/// `Unopened` has no value here: a session only exists once its transport is
/// open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Transport open, nothing sent yet
    Opened,
    /// Last command applied a preset
    Preset,
    /// Begin frame accepted, image transfer in progress
    Uploading,
    /// Custom image uploaded and activated
    Committed,
    /// A transport call failed; terminal
    Failed,
}

/// Step of a custom upload after the begin frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    /// Writing chunk `index` (0-based)
    Chunk { index: usize },
    /// Sending the activation frame
    Commit,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chunk { index } => write!(f, "chunk {}", index + 1),
            Self::Commit => f.write_str("commit frame"),
        }
    }
}

/// Exclusive lighting session on one keyboard
///
/// The transport is closed by [`KeyboardSession::close`] or, failing that,
/// when the session is dropped.
pub struct KeyboardSession<T: Transport> {
    transport: T,
    state: SessionState,
    closed: bool,
}

impl KeyboardSession<HidWiredTransport> {
    /// Open the first HID interface matching `selector`
    pub fn open(selector: &DeviceSelector) -> Result<Self, KeyboardError> {
        let transport = HidDiscovery::new()?.open(selector)?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> KeyboardSession<T> {
    /// Take ownership of an already opened transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: SessionState::Opened,
            closed: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn device_info(&self) -> &TransportDeviceInfo {
        self.transport.device_info()
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Apply a built-in lighting effect
    ///
    /// Speed is 0-10 (1 fastest, 10 slowest), brightness 0-51.
    pub fn apply_preset(
        &mut self,
        mode: Mode,
        speed: u8,
        brightness: u8,
        color: Color,
    ) -> Result<(), KeyboardError> {
        self.ensure_usable()?;
        let frame = Frame::preset(mode, speed, brightness, color)?;
        info!("Applying preset: {}", frame);
        self.send_frame(&frame)?;
        self.state = SessionState::Preset;
        Ok(())
    }

    /// Upload and activate a raw custom image
    ///
    /// The image must be exactly 512 bytes; anything else is rejected before
    /// the device is touched.
    pub fn apply_custom(&mut self, image: &[u8]) -> Result<(), KeyboardError> {
        self.ensure_usable()?;
        let image = CustomImage::try_from(image)?;
        self.apply_image(&image)
    }

    /// Upload and activate a custom image
    pub fn apply_image(&mut self, image: &CustomImage) -> Result<(), KeyboardError> {
        self.ensure_usable()?;
        info!("Uploading custom image ({} bytes)", IMAGE_SIZE);

        self.send_frame(&Frame::begin_custom_upload())?;
        self.state = SessionState::Uploading;

        for (index, chunk) in image.chunks().enumerate() {
            debug!("Writing chunk {}: {} bytes", index, chunk.len());
            if let Err(source) = self.transport.write_chunk(chunk) {
                return Err(self.abort(UploadStage::Chunk { index }, source));
            }
        }

        let commit = Frame::commit_custom_upload();
        debug!("Sending frame: {}", commit);
        if let Err(source) = self.transport.send_feature_report(&commit.to_bytes()) {
            return Err(self.abort(UploadStage::Commit, source));
        }

        self.state = SessionState::Committed;
        info!("Custom image committed");
        Ok(())
    }

    /// Release the transport
    ///
    /// Safe to call more than once; later commands fail with
    /// [`KeyboardError::Closed`].
    pub fn close(&mut self) -> Result<(), KeyboardError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.transport.close()?;
        Ok(())
    }

    fn ensure_usable(&self) -> Result<(), KeyboardError> {
        if self.closed {
            return Err(KeyboardError::Closed);
        }
        if self.state == SessionState::Failed {
            return Err(KeyboardError::SessionFailed);
        }
        Ok(())
    }

    /// Send a frame outside an upload (preset or begin frame)
    fn send_frame(&mut self, frame: &Frame) -> Result<(), KeyboardError> {
        debug!("Sending frame: {}", frame);
        if let Err(e) = self.transport.send_feature_report(&frame.to_bytes()) {
            self.state = SessionState::Failed;
            return Err(e.into());
        }
        Ok(())
    }

    fn abort(&mut self, stage: UploadStage, source: TransportError) -> KeyboardError {
        warn!(
            "Custom upload aborted at {}: {}; device lighting state is unknown",
            stage, source
        );
        self.state = SessionState::Failed;
        KeyboardError::UploadAborted { stage, source }
    }
}

impl<T: Transport> Drop for KeyboardSession<T> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.transport.close() {
            warn!("Failed to close transport: {}", e);
        }
    }
}
