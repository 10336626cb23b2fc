//! Lighting command handlers.

use std::path::Path;

use aero_driver::color_map;
use aero_keyboard::{pack_image, unknown_names, Color, CustomImage, KeyboardError, Mode};
use anyhow::Context;
use tracing::warn;

use super::{open_session, CommandResult, DeviceOptions};

/// Apply a preset effect
pub fn preset(
    opts: &DeviceOptions,
    mode: Mode,
    speed: u8,
    brightness: u8,
    color: Color,
) -> CommandResult {
    let mut session = open_session(opts)?;
    session.apply_preset(mode, speed, brightness, color)?;
    session.close()?;
    println!("Preset: {mode} (speed {speed}, brightness {brightness}/51, {color})");
    Ok(())
}

/// Upload a raw image file
pub fn custom(opts: &DeviceOptions, file: &Path) -> CommandResult {
    let data =
        std::fs::read(file).with_context(|| format!("failed to read image {}", file.display()))?;
    // Check the size before touching the device
    let image = CustomImage::try_from(data.as_slice())
        .with_context(|| format!("invalid image {}", file.display()))?;
    upload(opts, &image)
}

/// Pack a key colour map and upload it, or dump it to a file
pub fn paint(opts: &DeviceOptions, file: &Path, dump: Option<&Path>) -> CommandResult {
    let colors = color_map::load(file)?;
    for name in unknown_names(&colors) {
        warn!("Unknown key name '{}' ignored (see `aero_driver layout`)", name);
    }
    let image = pack_image(&colors);

    if let Some(out) = dump {
        std::fs::write(out, image.as_bytes())
            .with_context(|| format!("failed to write image {}", out.display()))?;
        println!(
            "Wrote {} bytes ({} map entries) to {}",
            image.as_bytes().len(),
            colors.len(),
            out.display()
        );
        return Ok(());
    }
    upload(opts, &image)
}

/// Advice for an upload that stopped after the keyboard began overwriting
/// its lighting buffer
fn reupload_hint(err: &KeyboardError) -> Option<&'static str> {
    err.device_state_uncertain().then_some(
        "The keyboard may show a partial image; reconnect it and upload again, \
         or apply a preset to restore a known state",
    )
}

fn upload(opts: &DeviceOptions, image: &CustomImage) -> CommandResult {
    let mut session = open_session(opts)?;
    if let Err(e) = session.apply_image(image) {
        if let Some(hint) = reupload_hint(&e) {
            warn!("{}", hint);
        }
        return Err(e.into());
    }
    session.close()?;
    println!("Custom image uploaded");
    Ok(())
}
