//! Driver configuration
//!
//! Stored as TOML. Preset colours are written as bare names (`"white"`), and
//! numbers 0-7 are accepted too.
//!
//! ```toml
//! [device]
//! vendor_id = 0x1044
//! product_id = 0x7a3b
//! interface = 3
//!
//! [preset]
//! speed = 0
//! brightness = 20
//! color = "white"
//! ```

use std::path::{Path, PathBuf};

use aero_keyboard::frame::{BRIGHTNESS_MAX, SPEED_MAX};
use aero_keyboard::Color;
use aero_transport::DeviceSelector;
use anyhow::{bail, Context};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Default preset speed when neither CLI nor config give one
pub const DEFAULT_SPEED: u8 = 0;

/// Default preset brightness when neither CLI nor config give one
pub const DEFAULT_BRIGHTNESS: u8 = 20;

fn serialize_color<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(color.name())
}

/// Accept a colour name or its wire number
fn deserialize_color<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ColorRepr {
        Name(String),
        Number(u8),
    }

    match ColorRepr::deserialize(d)? {
        ColorRepr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        ColorRepr::Number(n) => Color::try_from(n).map_err(serde::de::Error::custom),
    }
}

/// Defaults for the `preset` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetDefaults {
    /// 0-10, 1 fastest
    pub speed: u8,
    /// 0-51
    pub brightness: u8,
    #[serde(
        serialize_with = "serialize_color",
        deserialize_with = "deserialize_color"
    )]
    pub color: Color,
}

impl Default for PresetDefaults {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            brightness: DEFAULT_BRIGHTNESS,
            color: Color::White,
        }
    }
}

/// Top-level driver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Which HID interface to open
    pub device: DeviceSelector,
    pub preset: PresetDefaults,
}

impl DriverConfig {
    /// `$XDG_CONFIG_HOME/aero/config.toml`, or `./aero/config.toml` without a
    /// config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aero")
            .join("config.toml")
    }

    /// Load config from a file, or return defaults if it doesn't exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_existing(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a file that must exist
    pub fn load_existing(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse and range-check a TOML document
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: DriverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.preset.speed > SPEED_MAX {
            bail!("preset.speed must be 0-{}, got {}", SPEED_MAX, self.preset.speed);
        }
        if self.preset.brightness > BRIGHTNESS_MAX {
            bail!(
                "preset.brightness must be 0-{}, got {}",
                BRIGHTNESS_MAX,
                self.preset.brightness
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = DriverConfig::from_toml("").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.device.vendor_id, 0x1044);
        assert_eq!(config.device.product_id, 0x7a3b);
        assert_eq!(config.device.interface, 3);
        assert_eq!(config.preset.speed, 0);
        assert_eq!(config.preset.brightness, 20);
        assert_eq!(config.preset.color, Color::White);
    }

    #[test]
    fn test_full_config() {
        let config = DriverConfig::from_toml(
            r#"
            [device]
            vendor_id = 0x1234
            product_id = 0xabcd
            interface = 1

            [preset]
            speed = 4
            brightness = 51
            color = "Purple"
            "#,
        )
        .unwrap();
        assert_eq!(config.device.vendor_id, 0x1234);
        assert_eq!(config.device.product_id, 0xabcd);
        assert_eq!(config.device.interface, 1);
        assert_eq!(config.preset.speed, 4);
        assert_eq!(config.preset.brightness, 51);
        assert_eq!(config.preset.color, Color::Purple);
    }

    #[test]
    fn test_partial_sections() {
        let config = DriverConfig::from_toml("[preset]\ncolor = 1\n").unwrap();
        assert_eq!(config.preset.color, Color::Red);
        assert_eq!(config.preset.brightness, 20);
        assert_eq!(config.device, DeviceSelector::default());

        let config = DriverConfig::from_toml("[device]\ninterface = 0\n").unwrap();
        assert_eq!(config.device.interface, 0);
        assert_eq!(config.device.vendor_id, 0x1044);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(DriverConfig::from_toml("[preset]\ncolor = \"pink\"\n").is_err());
        assert!(DriverConfig::from_toml("[preset]\ncolor = 8\n").is_err());
        assert!(DriverConfig::from_toml("[preset]\nspeed = 11\n").is_err());
        assert!(DriverConfig::from_toml("[preset]\nbrightness = 52\n").is_err());
        assert!(DriverConfig::from_toml("[device]\nvendor_id = 70000\n").is_err());
    }

    #[test]
    fn test_color_serializes_as_name() {
        let toml_str = toml::to_string_pretty(&DriverConfig::default()).unwrap();
        assert!(toml_str.contains("color = \"white\""));
        assert!(toml_str.contains("[device]"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(DriverConfig::load(&path).unwrap(), DriverConfig::default());
        assert!(DriverConfig::load_existing(&path).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = DriverConfig::default();
        config.preset.color = Color::Orange;
        config.preset.speed = 7;
        config.save(&path).unwrap();

        assert_eq!(DriverConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_default_path() {
        let path = DriverConfig::default_path();
        assert!(path.ends_with("aero/config.toml"));
    }
}
