//! Aero keyboard lighting driver
//!
//! Host-side pieces of the `aero_driver` binary that are worth testing on
//! their own: the configuration file and key colour map loading. The
//! protocol itself lives in `aero-keyboard`, the HID plumbing in
//! `aero-transport`.

pub mod color_map;
pub mod config;

// Re-export the lighting API for convenience
pub use aero_keyboard::{Color, KeyboardSession, Mode, RgbColor};
pub use aero_transport::DeviceSelector;
