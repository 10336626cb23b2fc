//! Command handlers for the CLI application.
//!
//! - `lighting`: commands that change the keyboard (preset, custom, paint)
//! - `utility`: read-only helpers (list, layout, modes)

pub mod lighting;
pub mod utility;

use aero_keyboard::KeyboardSession;
use aero_transport::{
    BoxedTransport, DeviceSelector, HidDiscovery, PacketFilter, PrinterConfig, PrinterTransport,
};
use anyhow::Context;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Where to find the keyboard and how to watch the traffic
#[derive(Debug, Clone)]
pub struct DeviceOptions {
    pub selector: DeviceSelector,
    /// Set when `--monitor` is given
    pub printer_config: Option<PrinterConfig>,
}

/// Create printer config from CLI flags
pub fn create_printer_config(
    monitor: bool,
    hex: bool,
    filter: PacketFilter,
) -> Option<PrinterConfig> {
    if !monitor {
        return None;
    }
    Some(
        PrinterConfig::default()
            .with_hex(hex)
            .with_filter(filter)
            .with_describer(aero_keyboard::frame::describe),
    )
}

/// Open a lighting session on the selected keyboard.
/// If monitoring is enabled the transport is wrapped with the printer.
pub fn open_session(opts: &DeviceOptions) -> anyhow::Result<KeyboardSession<BoxedTransport>> {
    let transport = HidDiscovery::new()?
        .open(&opts.selector)
        .with_context(|| format!("failed to open keyboard {}", opts.selector))?;

    let transport: BoxedTransport = match &opts.printer_config {
        Some(config) => PrinterTransport::wrap(Box::new(transport), config.clone()),
        None => Box::new(transport),
    };
    Ok(KeyboardSession::new(transport))
}
