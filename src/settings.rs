//! Runtime settings for the studio binaries.
//!
//! Resolved in layers, later ones winning field by field:
//!
//! 1. built-in defaults ([`StudioSettings::default`])
//! 2. a JSON file named by `CHARTSTUDIO_CONFIG`, or `chartstudio.json` in
//!    the working directory when that variable is unset
//! 3. `CHARTSTUDIO_*` environment variables

use crate::error::{Result, StudioError};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "CHARTSTUDIO_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "chartstudio.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioSettings {
    /// Address the web server listens on
    pub bind_addr: String,
    /// Where saved charts are persisted; `None` keeps them in memory only
    pub store_path: Option<PathBuf>,
    /// Write the store after every change
    pub autosave: bool,
    /// Theme given to newly created charts
    pub default_theme: Theme,
    pub preview_width: u32,
    pub preview_height: u32,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            store_path: Some(PathBuf::from("charts.bin.gz")),
            autosave: true,
            default_theme: Theme::Light,
            preview_width: 640,
            preview_height: 400,
        }
    }
}

/// Fields a settings file may set; anything missing keeps the previous layer
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    bind_addr: Option<String>,
    store_path: Option<PathBuf>,
    autosave: Option<bool>,
    default_theme: Option<Theme>,
    preview_width: Option<u32>,
    preview_height: Option<u32>,
}

impl StudioSettings {
    /// Fully resolved settings from defaults, file and process environment
    pub fn load() -> Result<Self> {
        let mut settings = StudioSettings::default();

        let explicit = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if path.exists() {
            settings.merge_file(&path)?;
        } else if explicit.is_some() {
            return Err(StudioError::invalid(format!(
                "Settings file {} does not exist",
                path.display()
            )));
        }

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Overlays the fields present in a JSON settings file
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.merge_json(&text)?;
        log::debug!("merged settings from {}", path.display());
        Ok(())
    }

    pub fn merge_json(&mut self, text: &str) -> Result<()> {
        let file: SettingsFile = serde_json::from_str(text)?;
        if let Some(v) = file.bind_addr {
            self.bind_addr = v;
        }
        if let Some(v) = file.store_path {
            self.store_path = Some(v);
        }
        if let Some(v) = file.autosave {
            self.autosave = v;
        }
        if let Some(v) = file.default_theme {
            self.default_theme = v;
        }
        if let Some(v) = file.preview_width {
            self.preview_width = v;
        }
        if let Some(v) = file.preview_height {
            self.preview_height = v;
        }
        Ok(())
    }

    /// Applies `CHARTSTUDIO_*` overrides read through `lookup`
    ///
    /// `CHARTSTUDIO_STORE` set to an empty string or `memory` disables
    /// persistence.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CHARTSTUDIO_BIND") {
            self.bind_addr = v;
        }
        if let Some(v) = lookup("CHARTSTUDIO_STORE") {
            self.store_path = match v.trim() {
                "" | "memory" => None,
                path => Some(PathBuf::from(path)),
            };
        }
        if let Some(v) = lookup("CHARTSTUDIO_AUTOSAVE") {
            self.autosave = match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(StudioError::invalid(format!(
                        "CHARTSTUDIO_AUTOSAVE must be a boolean, got '{}'",
                        other
                    )));
                }
            };
        }
        if let Some(v) = lookup("CHARTSTUDIO_THEME") {
            self.default_theme = Theme::from_name(&v).ok_or_else(|| {
                StudioError::invalid(format!("Unknown theme '{}'", v))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn file_overrides_only_present_fields() {
        let mut settings = StudioSettings::default();
        settings
            .merge_json(r#"{"bind_addr": "0.0.0.0:8080", "default_theme": "dark"}"#)
            .unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.default_theme, Theme::Dark);
        assert!(settings.autosave);
        assert_eq!(settings.preview_width, 640);
    }

    #[test]
    fn env_overrides_file() {
        let mut settings = StudioSettings::default();
        settings.merge_json(r#"{"autosave": true}"#).unwrap();
        settings
            .apply_env(env(&[
                ("CHARTSTUDIO_AUTOSAVE", "off"),
                ("CHARTSTUDIO_STORE", "memory"),
                ("CHARTSTUDIO_THEME", "Dark"),
            ]))
            .unwrap();
        assert!(!settings.autosave);
        assert_eq!(settings.store_path, None);
        assert_eq!(settings.default_theme, Theme::Dark);
    }

    #[test]
    fn bad_env_values_are_rejected() {
        let mut settings = StudioSettings::default();
        assert!(
            settings
                .apply_env(env(&[("CHARTSTUDIO_AUTOSAVE", "sometimes")]))
                .is_err()
        );
        assert!(
            settings
                .apply_env(env(&[("CHARTSTUDIO_THEME", "neon")]))
                .is_err()
        );
    }
}
