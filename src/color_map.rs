//! Key colour maps for the `paint` command
//!
//! A colour map is a flat table of key name to hex colour, in JSON or TOML
//! (picked by file extension):
//!
//! ```json
//! { "esc": "#ff0000", "w": "00ff00", "space": "#0000ff" }
//! ```
//!
//! TOML keys that are not bare identifiers need quoting (`"\\" = "ffffff"`).

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use aero_keyboard::RgbColor;
use anyhow::{anyhow, bail, Context};

/// Supported colour map encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFormat {
    Json,
    Toml,
}

impl MapFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Load a colour map file
pub fn load(path: &Path) -> anyhow::Result<HashMap<String, RgbColor>> {
    let format = MapFormat::from_path(path).ok_or_else(|| {
        anyhow!(
            "unsupported colour map {} (expected .json or .toml)",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read colour map {}", path.display()))?;
    parse(&content, format).with_context(|| format!("invalid colour map {}", path.display()))
}

/// Parse a colour map document
pub fn parse(content: &str, format: MapFormat) -> anyhow::Result<HashMap<String, RgbColor>> {
    // BTreeMap so the first bad entry reported is stable
    let raw: BTreeMap<String, String> = match format {
        MapFormat::Json => serde_json::from_str(content)?,
        MapFormat::Toml => toml::from_str(content)?,
    };

    let mut colors = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let color = match RgbColor::from_hex(&value) {
            Ok(color) => color,
            Err(e) => bail!("key \"{}\": {}", key, e),
        };
        colors.insert(key, color);
    }
    Ok(colors)
}
