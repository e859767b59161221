//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; read from a JSON file natively.

use serde::{Deserialize, Serialize};

use crate::consts::{ROCK_COUNT, STAR_COUNT};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Stars in the background field
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => STAR_COUNT / 3,
            QualityPreset::Medium => STAR_COUNT,
            QualityPreset::High => STAR_COUNT * 2,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Rocks spawned at start
    pub rock_count: usize,
    /// Thruster exhaust and explosion debris
    pub particles: bool,
    /// Status text in the top-left corner
    pub debug_overlay: bool,
    /// Allow steering toward the mouse pointer
    pub pointer_follow: bool,
    /// Apply thrust, brake and fire independently in one frame instead of
    /// only the first one held
    pub simultaneous_actions: bool,
    /// Fixed RNG seed; random per run when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            rock_count: ROCK_COUNT,
            particles: true,
            debug_overlay: true,
            pointer_follow: true,
            simultaneous_actions: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "rock_drift_settings";

    /// Environment variable naming a native settings file
    pub const PATH_ENV: &'static str = "ROCK_DRIFT_SETTINGS";
    /// Native settings file used when the variable is unset
    pub const DEFAULT_PATH: &'static str = "rock_drift_settings.json";

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::local_storage()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored.as_deref().map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings back to LocalStorage so they can be edited in place
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> bool {
        let Some(storage) = Self::local_storage() else {
            return false;
        };
        let written = self
            .to_json()
            .ok()
            .is_some_and(|json| storage.set_item(Self::STORAGE_KEY, &json).is_ok());
        if !written {
            log::warn!("Could not store settings");
        }
        written
    }

    /// Load settings from the native settings file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        Self::load_from(std::path::Path::new(&path))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
        assert!(QualityPreset::Low.star_count() < QualityPreset::High.star_count());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"rock_count": 4, "quality": "High"}"#)
            .expect("valid settings");
        assert_eq!(settings.rock_count, 4);
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.particles);
        assert!(!settings.simultaneous_actions);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        settings.seed = Some(99);
        let json = settings.to_json().expect("serializable");
        assert_eq!(Settings::from_json(&json).expect("valid"), settings);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("rock_drift_settings_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");

        let missing = dir.join("missing.json");
        assert_eq!(Settings::load_from(&missing), Settings::default());

        let good = dir.join("good.json");
        std::fs::write(&good, r#"{"particles": false}"#).expect("write");
        assert!(!Settings::load_from(&good).particles);

        let bad = dir.join("bad.json");
        std::fs::write(&bad, "not json").expect("write");
        assert_eq!(Settings::load_from(&bad), Settings::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{rock_count: }").is_err());
    }
}
