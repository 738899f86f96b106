use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::*;

/// What to print when recognition succeeds but finds no text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPolicy {
    /// Print nothing.
    #[default]
    Quiet,
    /// Print an explanatory message.
    Announce,
}

/// Tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory containing the engine's model files.
    #[serde(default = "default_models_dir")]
    pub models_dir: String,

    /// Recognition language.
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Request rotated-text correction from the engine.
    #[serde(default = "default_use_angle_cls")]
    pub use_angle_cls: bool,

    /// Keep only fragments whose confidence strictly exceeds this value.
    /// Absent means no filtering.
    #[serde(default)]
    pub confidence_threshold: Option<f32>,

    /// Behavior when no text is found.
    #[serde(default)]
    pub on_empty: EmptyPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            ocr_language: default_ocr_language(),
            use_angle_cls: default_use_angle_cls(),
            confidence_threshold: None,
            on_empty: EmptyPolicy::default(),
        }
    }
}

impl Settings {
    fn settings_dir() -> PathBuf {
        PathBuf::from(default_home_path()).join(".textgrab")
    }

    fn primary_settings_path() -> PathBuf {
        Self::settings_dir().join("settings.json")
    }

    /// Load settings from the default location.
    ///
    /// Falls back to defaults if the file is absent or unreadable, and
    /// persists them so the file is there to edit next time.
    pub fn load() -> Self {
        if let Ok(settings) = Self::load_from(&Self::primary_settings_path()) {
            return settings;
        }

        let default_settings = Self::default();
        if let Err(e) = default_settings.save() {
            tracing::debug!("could not persist default settings: {e}");
        }
        default_settings
    }

    /// Load settings from an explicit path.
    ///
    /// Unlike [`Settings::load`], failures surface to the caller; a path
    /// the user named must exist and parse.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::primary_settings_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}
