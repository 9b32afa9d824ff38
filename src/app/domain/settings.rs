use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::presentation::{DEFAULT_CANVAS_WIDTH, DEFAULT_TITLE};
use crate::app::infrastructure::error::{AppError, Result};

pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Undo steps kept per editing session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_title")]
    pub default_title: String,

    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,

    /// Zoom applied when a presentation is opened
    #[serde(default = "default_scale")]
    pub default_scale: f64,

    /// Overrides the presentations file location
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

fn default_history_limit() -> usize {
    50
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

fn default_scale() -> f64 {
    1.0
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_title: default_title(),
            canvas_width: default_canvas_width(),
            default_scale: default_scale(),
            storage_path: None,
        }
    }
}

impl EditorSettings {
    /// Load settings from the config directory, or defaults if missing/corrupt
    pub fn load() -> Self {
        Self::load_or_init(&Self::get_config_path())
    }

    /// Settings at `config_path`. A missing file is created with defaults.
    pub fn load_or_init(config_path: &Path) -> Self {
        if !config_path.exists() {
            let default = Self::default();
            // Try to save defaults for next time
            if let Err(e) = default.save_to(config_path) {
                log::warn!("Failed to save default settings: {}", e);
            }
            return default;
        }

        match Self::load_from(config_path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(AppError::Settings("history limit must be at least 1".to_string()));
        }
        if !(self.canvas_width.is_finite() && self.canvas_width > 0.0) {
            return Err(AppError::Settings(format!(
                "invalid canvas width {}",
                self.canvas_width
            )));
        }
        Ok(())
    }

    /// Canvas height for the configured width at 16:9
    pub fn canvas_height(&self) -> f64 {
        self.canvas_width / super::presentation::SLIDE_ASPECT_RATIO
    }

    /// `default_scale` brought within the supported zoom range
    pub fn initial_scale(&self) -> f64 {
        clamp_scale(self.default_scale)
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("presentcraft");
        path.push("settings.json");
        path
    }
}

/// Clamp a zoom factor to `[MIN_SCALE, MAX_SCALE]`; non-finite becomes 1.0.
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        1.0
    }
}
