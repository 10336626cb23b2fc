//! Wire constants and framing helpers for the Aero lighting controller

/// Size of a command frame (feature report payload, without report ID)
pub const FRAME_SIZE: usize = 8;

/// Size of one bulk write during a custom image upload
pub const CHUNK_SIZE: usize = 64;

/// Number of chunk writes per custom image upload
pub const CHUNK_COUNT: usize = 8;

/// Total size of a custom lighting image
pub const IMAGE_SIZE: usize = CHUNK_SIZE * CHUNK_COUNT;

/// Report ID prefixed to every feature report and output report.
/// The controller uses unnumbered reports.
pub const REPORT_ID: u8 = 0x00;

/// Device identification constants
pub mod device {
    /// Controller vendor ID
    pub const VENDOR_ID: u16 = 0x1044;
    /// Aero keyboard product ID
    pub const PRODUCT_ID: u16 = 0x7a3b;
    /// HID interface that accepts lighting commands
    pub const INTERFACE_LIGHTING: i32 = 3;
}

/// Calculate the frame checksum
///
/// `0xFF - sum(data)`, all arithmetic modulo 256. With the checksum appended
/// the bytes of a frame always sum to `0xFF` (mod 256).
pub fn calculate_checksum(data: &[u8]) -> u8 {
    let sum = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0xFF_u8.wrapping_sub(sum)
}

/// Build a HID buffer: `[report_id=0] [payload...]`
pub fn with_report_id(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(payload.len() + 1);
    buf.push(REPORT_ID);
    buf.extend_from_slice(payload);
    buf
}
