use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::layers::DEPTH_MAX;
use crate::model::{LABEL_FONT_MAX, LABEL_FONT_MIN, Rgba};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub default_shape_width: f32,
    pub default_shape_height: f32,
    pub initial_depth: i32,
    pub label_font_size: f32,
    pub show_grid: bool,
    pub label_color: Rgba,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_shape_width: 120.0,
            default_shape_height: 80.0,
            initial_depth: DEPTH_MAX,
            label_font_size: 12.0,
            show_grid: false,
            label_color: Rgba::WHITE,
        }
    }
}

impl AppSettings {
    /// Pulls out-of-range values back to something the editor can use.
    fn sanitized(mut self) -> Self {
        let fallback = Self::default();
        if !(self.default_shape_width.is_finite() && self.default_shape_width > 0.0) {
            self.default_shape_width = fallback.default_shape_width;
        }
        if !(self.default_shape_height.is_finite() && self.default_shape_height > 0.0) {
            self.default_shape_height = fallback.default_shape_height;
        }
        if !self.label_font_size.is_finite() {
            self.label_font_size = fallback.label_font_size;
        }
        self.label_font_size = self.label_font_size.clamp(LABEL_FONT_MIN, LABEL_FONT_MAX);
        self
    }
}

pub(super) fn config_path() -> Option<String> {
    if let Some(home) = std::env::var_os("HOME") {
        let path = std::path::PathBuf::from(home)
            .join(".config")
            .join("umlcanvas.toml");
        if path.exists() {
            return Some(path.display().to_string());
        }
    }
    if std::path::Path::new("settings.toml").exists() {
        return Some("settings.toml".to_string());
    }
    None
}

fn parse_settings(path: &str, s: &str) -> Option<AppSettings> {
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(s).ok())
    } else {
        serde_json::from_str::<AppSettings>(s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(s).ok())
    }
}

/// Reads settings from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub(super) fn load_settings(path: &str) -> AppSettings {
    let s = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) => {
            log::info!("no settings at {path} ({err}); using defaults");
            return AppSettings::default();
        }
    };
    match parse_settings(path, &s) {
        Some(settings) => {
            log::info!("loaded settings from {path}");
            settings.sanitized()
        }
        None => {
            log::warn!("could not parse settings file {path}; using defaults");
            AppSettings::default()
        }
    }
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> anyhow::Result<()> {
    let text = if path.ends_with(".toml") {
        toml::to_string_pretty(settings).context("serializing settings as TOML")?
    } else {
        serde_json::to_string_pretty(settings).context("serializing settings as JSON")?
    };
    std::fs::write(path, text).with_context(|| format!("writing settings to {path}"))?;
    log::info!("saved settings to {path}");
    Ok(())
}
