//! Utility command handlers.

use aero_keyboard::frame::{BRIGHTNESS_MAX, SPEED_MAX};
use aero_keyboard::layout::{self, SLOT_COUNT};
use aero_keyboard::{Color, Mode};
use aero_transport::{DeviceSelector, HidDiscovery};

use super::CommandResult;

/// List HID interfaces of the selected vendor/product
pub fn list(selector: &DeviceSelector, json: bool) -> CommandResult {
    let devices = HidDiscovery::new()?.list_devices(selector);

    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!(
            "No devices with VID={:04x} PID={:04x} found",
            selector.vendor_id, selector.product_id
        );
        return Ok(());
    }

    // The first matching interface is the one commands open
    let opened = devices
        .iter()
        .position(|d| selector.matches(d.vid, d.pid, d.interface_number));

    println!("HID interfaces ({selector}):");
    for (i, device) in devices.iter().enumerate() {
        let marker = if Some(i) == opened { "*" } else { " " };
        println!(
            "{} VID={:04x} PID={:04x} if={} path={}",
            marker, device.vid, device.pid, device.interface_number, device.device_path
        );
        if let Some(name) = &device.product_name {
            println!("    {name}");
        }
    }
    if opened.is_none() {
        println!("No interface {} present", selector.interface);
    }
    Ok(())
}

/// Print the custom image slot table
pub fn layout() -> CommandResult {
    println!("Custom image slots ({SLOT_COUNT} x [0, r, g, b]):");
    for (i, name) in layout::ordered_slots().iter().enumerate() {
        let slot = i + 1;
        let offset = i * 4;
        match name {
            Some(name) => println!("  {slot:3}  @{offset:3}  {name}"),
            None => println!("  {slot:3}  @{offset:3}  -"),
        }
    }
    Ok(())
}

/// List preset modes and colours
pub fn modes() -> CommandResult {
    println!("Modes:");
    for mode in Mode::ALL {
        println!("  {:#04x}  {}", mode.as_u8(), mode);
    }
    println!("  (3 / wave is reserved and rejected)");

    println!("\nColors:");
    for color in Color::ALL {
        println!("  {}  {}", color as u8, color);
    }

    println!("\nSpeed: 0-{SPEED_MAX} (1 fastest)   Brightness: 0-{BRIGHTNESS_MAX}");
    Ok(())
}
