//! Custom lighting image assembly
//!
//! A custom image is 128 four-byte records `[0, r, g, b]`, one per layout
//! slot, in slot order (see [`crate::layout`]). Slots without a key name or
//! without a requested colour stay dark.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use aero_transport::protocol::{CHUNK_SIZE, IMAGE_SIZE};
use tracing::debug;

use crate::error::KeyboardError;
use crate::frame::{encode_color_record, COLOR_RECORD_SIZE};
use crate::layout::{self, SLOT_COUNT};
use crate::led::RgbColor;

/// A complete 512-byte custom image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomImage([u8; IMAGE_SIZE]);

impl CustomImage {
    /// All LEDs off
    pub const fn blank() -> Self {
        Self([0; IMAGE_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; IMAGE_SIZE] {
        &self.0
    }

    /// The image split into upload chunks, in transfer order
    pub fn chunks(&self) -> std::slice::ChunksExact<'_, u8> {
        self.0.chunks_exact(CHUNK_SIZE)
    }

    /// Record for a 1-based slot
    pub fn record(&self, slot: usize) -> Option<[u8; COLOR_RECORD_SIZE]> {
        if !(1..=SLOT_COUNT).contains(&slot) {
            return None;
        }
        let start = (slot - 1) * COLOR_RECORD_SIZE;
        let mut record = [0u8; COLOR_RECORD_SIZE];
        record.copy_from_slice(&self.0[start..start + COLOR_RECORD_SIZE]);
        Some(record)
    }
}

impl Default for CustomImage {
    fn default() -> Self {
        Self::blank()
    }
}

impl TryFrom<&[u8]> for CustomImage {
    type Error = KeyboardError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let data: [u8; IMAGE_SIZE] = bytes.try_into().map_err(|_| KeyboardError::Length {
            expected: IMAGE_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(data))
    }
}

impl AsRef<[u8]> for CustomImage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build a custom image from key name → colour
///
/// Names that are not in the layout are ignored: callers may carry a larger
/// key vocabulary than this keyboard has LEDs.
pub fn pack_image<K, S>(color_by_name: &HashMap<K, RgbColor, S>) -> CustomImage
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    let mut data = [0u8; IMAGE_SIZE];
    for (record, slot) in data
        .chunks_exact_mut(COLOR_RECORD_SIZE)
        .zip(layout::ordered_slots())
    {
        let color = slot.and_then(|name| color_by_name.get(name).copied());
        record.copy_from_slice(&encode_color_record(color));
    }

    let ignored = unknown_names(color_by_name);
    if !ignored.is_empty() {
        debug!("Ignoring keys without a slot: {:?}", ignored);
    }
    CustomImage(data)
}

/// Names in the map that have no slot in the layout, sorted
pub fn unknown_names<K, S>(color_by_name: &HashMap<K, RgbColor, S>) -> Vec<String>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    let mut names: Vec<String> = color_by_name
        .keys()
        .map(|k| Borrow::<str>::borrow(k))
        .filter(|name| layout::slot_of(name).is_none())
        .map(str::to_string)
        .collect();
    names.sort();
    names
}
