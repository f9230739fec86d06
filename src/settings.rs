//! Session settings
//!
//! Read from a JSON file on native and from LocalStorage in the browser.
//! Missing fields fall back to defaults.

use std::path::Path;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest viewport the layout supports
pub const MIN_VIEWPORT: (f32, f32) = (800.0, 480.0);

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Particle pool cap for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 300,
            QualityPreset::Medium => 900,
            QualityPreset::High => 1800,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(SettingsError::UnknownQuality(s.to_string())),
        }
    }
}

/// Failure to load or validate settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("viewport {width}x{height} is below the 800x480 minimum")]
    ViewportTooSmall { width: f32, height: f32 },

    #[error("max_waves must be at least 1")]
    NoWaves,

    #[error("unknown quality preset '{0}'")]
    UnknownQuality(String),
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle budget preset
    pub quality: QualityPreset,
    /// Viewport size in world units
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// World size as a multiple of the viewport
    pub world_scale_x: f32,
    pub world_scale_y: f32,
    /// Normal waves before the boss
    pub max_waves: u32,
    /// Fixed session seed; hosts derive one from the clock when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            viewport_width: MIN_VIEWPORT.0,
            viewport_height: MIN_VIEWPORT.1,
            world_scale_x: 2.2,
            world_scale_y: 1.6,
            max_waves: 5,
            seed: None,
        }
    }
}

impl Settings {
    /// Viewport, raised to the supported minimum
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(
            self.viewport_width.max(MIN_VIEWPORT.0),
            self.viewport_height.max(MIN_VIEWPORT.1),
        )
    }

    pub fn world_scale(&self) -> Vec2 {
        Vec2::new(self.world_scale_x.max(1.0), self.world_scale_y.max(1.0))
    }

    /// Particle pool cap
    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }

    /// Reject settings the session cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (min_width, min_height) = MIN_VIEWPORT;
        if self.viewport_width < min_width || self.viewport_height < min_height {
            return Err(SettingsError::ViewportTooSmall {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if self.max_waves == 0 {
            return Err(SettingsError::NoWaves);
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "fruit_brawl_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok())
            .flatten();

        if let Some(json) = stored {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring stored settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        let Some(storage) = storage else {
            return;
        };

        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }

    /// Native has no implicit settings source
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
