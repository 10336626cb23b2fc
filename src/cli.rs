// CLI definitions using clap

use aero_keyboard::{Color, Mode};
use aero_transport::PacketFilter;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Parse a USB ID given as hex (`1044`, `0x1044`)
fn parse_usb_id(s: &str) -> Result<u16, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid USB ID '{s}': {e}"))
}

/// Parse an interface number given as decimal or `0x` hex
fn parse_interface(s: &str) -> Result<i32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => i32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid interface '{s}': {e}"))
}

#[derive(Parser)]
#[command(name = "aero_driver")]
#[command(author, version, about = "Aero keyboard RGB lighting driver")]
#[command(propagate_version = true)]
pub struct Cli {
    /// USB vendor ID in hex (default 1044)
    #[arg(long, global = true, value_parser = parse_usb_id)]
    pub vid: Option<u16>,

    /// USB product ID in hex (default 7a3b)
    #[arg(long, global = true, value_parser = parse_usb_id)]
    pub pid: Option<u16>,

    /// HID interface number of the lighting controller (default 3)
    #[arg(long, global = true, value_parser = parse_interface)]
    pub interface: Option<i32>,

    /// Config file (default: ~/.config/aero/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print every frame and chunk sent to the keyboard
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Dump chunk payloads in hex (with --monitor)
    #[arg(long, global = true)]
    pub hex: bool,

    /// Monitor filter (all, frames, chunks)
    #[arg(long, global = true, default_value = "all")]
    pub filter: PacketFilter,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Lighting ===
    /// Apply a built-in lighting effect
    #[command(visible_alias = "p")]
    Preset {
        /// Effect name or number (see `modes`)
        #[arg(short, long)]
        mode: Mode,
        /// Speed 0-10 (1 fastest, 10 slowest)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=10))]
        speed: Option<u8>,
        /// Brightness 0-51
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=51))]
        brightness: Option<u8>,
        /// Colour name or number 0-7
        #[arg(short, long)]
        color: Option<Color>,
    },

    /// Upload a raw 512-byte custom image and display it
    #[command(visible_alias = "c")]
    Custom {
        /// Image file
        file: PathBuf,
    },

    /// Upload a key colour map (.json or .toml) as a custom image
    Paint {
        /// Map of key name to hex colour
        file: PathBuf,
        /// Write the packed 512-byte image to this file instead of uploading
        #[arg(long, value_name = "OUT")]
        dump: Option<PathBuf>,
    },

    // === Info ===
    /// Print the key slot table used by custom images
    Layout,

    /// List HID interfaces of the selected keyboard
    #[command(visible_alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List preset effects and colours
    Modes,
}
