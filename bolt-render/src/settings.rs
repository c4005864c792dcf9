use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use bolt_core::{config::GeneratorConfig, strike::StrikeBounds};
use serde::Deserialize;

/// Everything read from the settings file.
///
/// Each table is optional; missing tables and keys fall back to defaults.
/// Without a `[bounds]` table strikes are placed relative to the canvas size.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub generator: GeneratorConfig,
    pub bounds: Option<StrikeBounds>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Canvas size when no background image is used.
    pub width: u32,
    pub height: u32,
    pub color: [u8; 3],
    /// Fill for the canvas when no background image is used.
    pub sky_color: [u8; 3],
    pub frame_delay_ms: u32,
    pub background: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            color: [250, 251, 165],
            sky_color: [18, 22, 36],
            frame_delay_ms: 100,
            background: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse settings in {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Strike bounds from the settings file, or derived from the canvas size.
    pub fn bounds_for(&self, width: u32, height: u32) -> StrikeBounds {
        self.bounds
            .unwrap_or_else(|| StrikeBounds::for_canvas(width as f64, height as f64))
    }
}
