//! Lighting protocol for Aero keyboards
//!
//! This crate encodes the controller's command frames, lays out custom
//! per-key images, and sequences uploads on top of any
//! [`aero_transport::Transport`].

pub mod error;
pub mod frame;
pub mod image;
pub mod layout;
pub mod led;
pub mod session;

pub use error::{KeyboardError, ValidationError};
pub use frame::{encode_color_record, encode_frame, Color, Frame, Kind, Mode};
pub use image::{pack_image, unknown_names, CustomImage};
pub use led::RgbColor;
pub use session::{KeyboardSession, SessionState, UploadStage};

// Re-export so callers don't need a direct dependency for common types
pub use aero_transport::{BoxedTransport, DeviceSelector, Transport, TransportError};
