//! PrinterTransport middleware for monitoring transport operations
//!
//! Wraps any Transport implementation and prints every frame and chunk
//! passing through it to stderr.
//!
//! # Example
//!
//! ```ignore
//! use aero_transport::{HidDiscovery, PrinterConfig, PrinterTransport, DeviceSelector};
//!
//! let transport = HidDiscovery::new()?.open(&DeviceSelector::default())?;
//! let monitored = PrinterTransport::wrap(Box::new(transport), PrinterConfig::default());
//! // Now all frames/chunks will be printed
//! ```

use std::str::FromStr;

use crossterm::style::Stylize;

use crate::protocol::FRAME_SIZE;
use crate::{BoxedTransport, Transport, TransportDeviceInfo, TransportError};

/// Decodes a command frame into a one-line description (`None` if malformed)
///
/// The frame grammar lives above the transport layer, so the caller supplies it.
pub type FrameDescriber = fn(&[u8]) -> Option<String>;

/// Packet filter for selective display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacketFilter {
    #[default]
    All,
    Frames,
    Chunks,
}

impl FromStr for PacketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "frames" | "frame" | "reports" => Ok(Self::Frames),
            "chunks" | "chunk" | "writes" => Ok(Self::Chunks),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Configuration for the PrinterTransport
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Dump chunk payloads in hex instead of a one-line summary
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: PacketFilter,
    /// Optional decoder for command frames
    pub describe: Option<FrameDescriber>,
}

impl PrinterConfig {
    /// Create config with hex output setting
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    /// Create config with filter
    pub fn with_filter(mut self, filter: PacketFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Create config with a frame decoder
    pub fn with_describer(mut self, describe: FrameDescriber) -> Self {
        self.describe = Some(describe);
        self
    }
}

/// Transport middleware that prints all frames and chunks
pub struct PrinterTransport {
    inner: BoxedTransport,
    config: PrinterConfig,
    chunk_index: usize,
}

impl PrinterTransport {
    /// Wrap a transport with printing middleware
    pub fn wrap(transport: BoxedTransport, config: PrinterConfig) -> BoxedTransport {
        Box::new(Self {
            inner: transport,
            config,
            chunk_index: 0,
        })
    }

    fn print_frame(&self, frame: &[u8; FRAME_SIZE]) {
        if self.config.filter == PacketFilter::Chunks {
            return;
        }
        let decoded = self.config.describe.and_then(|describe| describe(frame));
        match decoded {
            Some(text) => eprintln!(
                "{} {}  {}  {}",
                ">>>".cyan(),
                "FRAME".cyan().bold(),
                hex_line(frame),
                text.yellow()
            ),
            None => eprintln!(
                "{} {}  {}  {}",
                ">>>".cyan(),
                "FRAME".cyan().bold(),
                hex_line(frame),
                "UNDECODED".red().bold()
            ),
        }
    }

    fn print_chunk(&self, chunk: &[u8]) {
        if self.config.filter == PacketFilter::Frames {
            return;
        }
        eprintln!(
            "{} {}  #{} {} bytes",
            ">>>".green(),
            "WRITE".green().bold(),
            self.chunk_index,
            chunk.len()
        );
        if self.config.show_hex {
            for row in hex_rows(chunk) {
                eprintln!("    {}  {}", "HEX".dim(), row);
            }
        }
    }
}

impl Transport for PrinterTransport {
    fn send_feature_report(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<(), TransportError> {
        self.print_frame(frame);
        // A frame opens or closes a chunk run
        self.chunk_index = 0;
        self.inner.send_feature_report(frame)
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        self.print_chunk(chunk);
        self.chunk_index += 1;
        self.inner.write_chunk(chunk)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.inner.close()
    }
}

/// Format bytes as space-separated uppercase hex
pub fn hex_line(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split bytes into 16-byte hex rows prefixed with their offset
pub fn hex_rows(data: &[u8]) -> Vec<String> {
    data.chunks(16)
        .enumerate()
        .map(|(i, row)| format!("{:04x}: {}", i * 16, hex_line(row)))
        .collect()
}
