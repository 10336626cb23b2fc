//! Command frame encoding
//!
//! Every command is one 8-byte feature report:
//!
//! ```text
//! [kind] [0x00] [mode] [param1] [param2] [color] [flag] [checksum]
//! ```
//!
//! `param1` is speed (or pattern length), `param2` brightness. The checksum
//! makes the eight bytes sum to `0xFF` modulo 256.

use std::fmt;
use std::str::FromStr;

use aero_transport::protocol::{calculate_checksum, FRAME_SIZE};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::ValidationError;
use crate::led::RgbColor;

/// Maximum speed/length value (10 = slowest/longest, 1 = fastest)
pub const SPEED_MAX: u8 = 10;

/// Maximum brightness value
pub const BRIGHTNESS_MAX: u8 = 51;

/// Size of one per-key colour record in a custom image
pub const COLOR_RECORD_SIZE: usize = 4;

/// Mode value the firmware implements incorrectly (wave); never sent
pub const RESERVED_MODE: u8 = 3;

/// Frame kind (byte 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    Preset = 0x08,
    ReadConfig = 0x92,
    CustomConfig = 0x12,
}

impl Kind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x08 => Some(Self::Preset),
            0x92 => Some(Self::ReadConfig),
            0x12 => Some(Self::CustomConfig),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Preset => "preset",
            Self::ReadConfig => "read_config",
            Self::CustomConfig => "custom_config",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lighting effect (byte 2)
///
/// There is deliberately no variant for value 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Static = 1,
    Breathing = 2,
    FadeOnKeypress = 4,
    Marquee = 5,
    Ripple = 6,
    FlashOnKeypress = 7,
    Neon = 8,
    RainbowMarquee = 9,
    Raindrop = 10,
    CircleMarquee = 11,
    Hedge = 12,
    Rotate = 13,
    /// Display the uploaded custom image
    Custom = 0x34,
}

impl Mode {
    /// All modes in wire order
    pub const ALL: [Mode; 13] = [
        Mode::Static,
        Mode::Breathing,
        Mode::FadeOnKeypress,
        Mode::Marquee,
        Mode::Ripple,
        Mode::FlashOnKeypress,
        Mode::Neon,
        Mode::RainbowMarquee,
        Mode::Raindrop,
        Mode::CircleMarquee,
        Mode::Hedge,
        Mode::Rotate,
        Mode::Custom,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| *m as u8 == v)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Protocol name, as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Breathing => "breathing",
            Self::FadeOnKeypress => "fade_on_keypress",
            Self::Marquee => "marquee",
            Self::Ripple => "ripple",
            Self::FlashOnKeypress => "flash_on_keypress",
            Self::Neon => "neon",
            Self::RainbowMarquee => "rainbow_marquee",
            Self::Raindrop => "raindrop",
            Self::CircleMarquee => "circle_marquee",
            Self::Hedge => "hedge",
            Self::Rotate => "rotate",
            Self::Custom => "custom",
        }
    }
}

const MODE_ALLOWED: &str = "1-2, 4-13 or 0x34 (3 is reserved)";

impl TryFrom<u8> for Mode {
    type Error = ValidationError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::from_u8(v).ok_or_else(|| ValidationError::new("mode", v, MODE_ALLOWED))
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    /// Accepts protocol names (`static`, `rainbow_marquee`, ...) or wire numbers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace('-', "_");
        if lower == "wave" {
            return Err(ValidationError::new("mode", s, MODE_ALLOWED));
        }
        if let Some(mode) = Self::ALL.iter().copied().find(|m| m.name() == lower) {
            return Ok(mode);
        }
        let number = match lower.strip_prefix("0x") {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => lower.parse::<u8>(),
        };
        match number {
            Ok(v) => Self::try_from(v),
            Err(_) => Err(ValidationError::new("mode", s, MODE_ALLOWED)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Preset colour (byte 5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Orange = 5,
    Purple = 6,
    #[default]
    White = 7,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Orange,
        Color::Purple,
        Color::White,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::White => "white",
        }
    }
}

const COLOR_ALLOWED: &str = "black, red, green, yellow, blue, orange, purple, white (0-7)";

impl TryFrom<u8> for Color {
    type Error = ValidationError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::from_u8(v).ok_or_else(|| ValidationError::new("color", v, COLOR_ALLOWED))
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(color) = Self::ALL.iter().copied().find(|c| c.name() == lower) {
            return Ok(color);
        }
        match lower.parse::<u8>() {
            Ok(v) => Self::try_from(v),
            Err(_) => Err(ValidationError::new("color", s, COLOR_ALLOWED)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire layout of a frame
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct FrameBytes {
    kind: u8,
    _reserved: u8,
    mode: u8,
    param1: u8,
    param2: u8,
    color: u8,
    flag: u8,
    checksum: u8,
}

/// One validated command frame
///
/// Fields are private so every frame in existence is within range; the
/// checksum is derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    kind: Kind,
    mode: Mode,
    param1: u8,
    param2: u8,
    color: Color,
    activate: bool,
}

impl Frame {
    /// Create a frame, checking `param1` (0-10) and `param2` (0-51)
    pub fn new(
        kind: Kind,
        mode: Mode,
        param1: u8,
        param2: u8,
        color: Color,
        activate: bool,
    ) -> Result<Self, ValidationError> {
        if param1 > SPEED_MAX {
            return Err(ValidationError::new("param1 (speed)", param1, "0-10"));
        }
        if param2 > BRIGHTNESS_MAX {
            return Err(ValidationError::new("param2 (brightness)", param2, "0-51"));
        }
        Ok(Self {
            kind,
            mode,
            param1,
            param2,
            color,
            activate,
        })
    }

    /// Preset effect frame
    pub fn preset(
        mode: Mode,
        speed: u8,
        brightness: u8,
        color: Color,
    ) -> Result<Self, ValidationError> {
        Self::new(Kind::Preset, mode, speed, brightness, color, false)
    }

    /// First frame of a custom upload: tells the controller image data follows
    pub const fn begin_custom_upload() -> Self {
        Self {
            kind: Kind::CustomConfig,
            mode: Mode::Static,
            param1: 8,
            param2: 0,
            color: Color::Black,
            activate: false,
        }
    }

    /// Last frame of a custom upload: switches the display to the new image
    pub const fn commit_custom_upload() -> Self {
        Self {
            kind: Kind::Preset,
            mode: Mode::Custom,
            param1: 5,
            param2: 50,
            color: Color::Green,
            activate: true,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn param1(&self) -> u8 {
        self.param1
    }

    pub fn param2(&self) -> u8 {
        self.param2
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The activation flag (byte 6)
    pub fn flag(&self) -> u8 {
        u8::from(self.activate)
    }

    /// `(0xFF - (kind + mode + param1 + param2 + color + flag)) mod 256`
    pub fn checksum(&self) -> u8 {
        calculate_checksum(&self.wire(0).as_bytes()[..FRAME_SIZE - 1])
    }

    /// Serialize to the 8 wire bytes
    pub fn to_bytes(&self) -> [u8; FRAME_SIZE] {
        let wire = self.wire(self.checksum());
        let mut out = [0u8; FRAME_SIZE];
        out.copy_from_slice(wire.as_bytes());
        out
    }

    /// Parse wire bytes back into a frame
    ///
    /// Returns `None` unless the buffer is exactly one well-formed frame with a
    /// correct checksum.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let wire = FrameBytes::read_from_bytes(bytes).ok()?;
        if wire._reserved != 0 || wire.flag > 1 {
            return None;
        }
        let frame = Self::new(
            Kind::from_u8(wire.kind)?,
            Mode::from_u8(wire.mode)?,
            wire.param1,
            wire.param2,
            Color::from_u8(wire.color)?,
            wire.flag == 1,
        )
        .ok()?;
        (frame.checksum() == wire.checksum).then_some(frame)
    }

    fn wire(&self, checksum: u8) -> FrameBytes {
        FrameBytes {
            kind: self.kind as u8,
            _reserved: 0,
            mode: self.mode as u8,
            param1: self.param1,
            param2: self.param2,
            color: self.color as u8,
            flag: self.flag(),
            checksum,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mode={} speed={} brightness={} color={}",
            self.kind, self.mode, self.param1, self.param2, self.color
        )?;
        if self.activate {
            f.write_str(" activate")?;
        }
        Ok(())
    }
}

/// Encode a frame from raw field values
///
/// Rejects `param1` outside 0-10, `param2` outside 0-51 and `flag` other than
/// 0 or 1. The reserved mode value is unrepresentable in [`Mode`]; callers
/// holding a raw mode number go through `Mode::try_from`.
pub fn encode_frame(
    kind: Kind,
    mode: Mode,
    param1: u8,
    param2: u8,
    color: Color,
    flag: u8,
) -> Result<[u8; FRAME_SIZE], ValidationError> {
    if flag > 1 {
        return Err(ValidationError::new("flag", flag, "0 or 1"));
    }
    Ok(Frame::new(kind, mode, param1, param2, color, flag == 1)?.to_bytes())
}

/// Encode one per-key colour record: `[0, r, g, b]`, or all zero for no colour
pub fn encode_color_record(color: Option<RgbColor>) -> [u8; COLOR_RECORD_SIZE] {
    match color {
        Some(c) => [0, c.r, c.g, c.b],
        None => [0; COLOR_RECORD_SIZE],
    }
}

/// One-line description of a frame, for traffic monitors
pub fn describe(bytes: &[u8]) -> Option<String> {
    Frame::decode(bytes).map(|frame| frame.to_string())
}
