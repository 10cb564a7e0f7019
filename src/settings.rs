use crate::capture::Rgba;
use crate::controller::HotkeyMode;
use crate::hotkey::{parse_hotkey, Hotkey};
use crate::layout::GridSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Global hotkey that shows the overlay. Invalid strings fall back to F4.
    pub hotkey: Option<String>,
    pub hotkey_mode: HotkeyMode,
    /// Tile configuration document. Defaults to `~/LaunchPad/Apps.text`.
    pub config_path: Option<String>,
    pub cell_size: u32,
    pub spacing: u32,
    /// RGBA colour blended over the captured screen.
    pub dim_color: [u8; 4],
    pub label_font_size: f32,
    /// When enabled the application initialises the logger at debug level.
    pub debug_logging: bool,
    /// Also write logs to this file.
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let grid = GridSpec::default();
        Self {
            hotkey: Some("F4".into()),
            hotkey_mode: HotkeyMode::Toggle,
            config_path: None,
            cell_size: grid.cell_size,
            spacing: grid.spacing,
            dim_color: [0x10, 0x10, 0x10, 0xBB],
            label_font_size: 12.0,
            debug_logging: false,
            log_file: None,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("LaunchPad")
        .join("Apps.text")
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn hotkey(&self) -> Hotkey {
        if let Some(hotkey) = &self.hotkey {
            match parse_hotkey(hotkey) {
                Some(k) => return k,
                None => {
                    tracing::warn!(
                        "provided hotkey string '{}' is invalid; using default F4",
                        hotkey
                    );
                }
            }
        }
        Hotkey::default()
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec {
            cell_size: self.cell_size,
            spacing: self.spacing,
        }
    }

    pub fn dim(&self) -> Rgba {
        Rgba::from_array(self.dim_color)
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(PathBuf::from)
    }
}
