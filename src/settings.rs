//! Game settings and tuning
//!
//! Persisted as JSON: LocalStorage on the web, a file on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid setting {field}: {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Player physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub radius: f32,
    pub gravity: f32,
    pub boost_multiplier: f32,
    pub min_ground_speed: f32,
    /// World-space spacing of terrain samples and grid lines
    pub tile_spacing: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            gravity: GRAVITY,
            boost_multiplier: BOOST_MULTIPLIER,
            min_ground_speed: MIN_GROUND_SPEED,
            tile_spacing: TILE_SPACING,
        }
    }
}

/// Camera follow/zoom tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub follow_smoothing: f32,
    pub look_ahead: f32,
    pub zoom_smoothing: f32,
    pub zoom_speed_threshold: f32,
    pub zoom_falloff: f32,
    pub pan_speed: f32,
    pub zoom_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow_smoothing: FOLLOW_SMOOTHING,
            look_ahead: LOOK_AHEAD,
            zoom_smoothing: ZOOM_SMOOTHING,
            zoom_speed_threshold: ZOOM_SPEED_THRESHOLD,
            zoom_falloff: ZOOM_FALLOFF,
            pan_speed: PAN_SPEED,
            zoom_step: ZOOM_STEP,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Terrain seed; a fresh one is picked each run when unset
    pub seed: Option<u64>,
    pub physics: PhysicsSettings,
    pub camera: CameraSettings,
    /// Log frame rate periodically
    pub show_fps: bool,
}

impl Settings {
    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the frame loop cannot run with
    ///
    /// Spacing and radius must be positive; smoothing factors must lie in
    /// `(0, 1]`; everything else just has to be finite.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let p = &self.physics;
        let c = &self.camera;

        let positive = [("physics.tile_spacing", p.tile_spacing), ("physics.radius", p.radius)];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid { field, value });
            }
        }

        let fractions = [
            ("camera.follow_smoothing", c.follow_smoothing),
            ("camera.zoom_smoothing", c.zoom_smoothing),
        ];
        for (field, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(SettingsError::Invalid { field, value });
            }
        }

        let finite = [
            ("physics.gravity", p.gravity),
            ("physics.boost_multiplier", p.boost_multiplier),
            ("physics.min_ground_speed", p.min_ground_speed),
            ("camera.look_ahead", c.look_ahead),
            ("camera.zoom_speed_threshold", c.zoom_speed_threshold),
            ("camera.zoom_falloff", c.zoom_falloff),
            ("camera.pan_speed", c.pan_speed),
            ("camera.zoom_step", c.zoom_step),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::Invalid { field, value });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    const STORAGE_KEY: &'static str = "hill_roller_settings";

    /// Environment variable naming a settings file (native only)
    pub const PATH_ENV: &'static str = "HILL_ROLLER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
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

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Load settings from the file named by `HILL_ROLLER_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV) else {
            return Self::default();
        };
        match Self::load_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.seed, None);
        assert_eq!(s.physics.radius, PLAYER_RADIUS);
        assert_eq!(s.physics.tile_spacing, TILE_SPACING);
        assert_eq!(s.camera.look_ahead, LOOK_AHEAD);
        assert!(!s.show_fps);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "seed": 9, "physics": { "gravity": 0.1 } }"#).unwrap();
        assert_eq!(s.seed, Some(9));
        assert_eq!(s.physics.gravity, 0.1);
        assert_eq!(s.physics.radius, PLAYER_RADIUS);
        assert_eq!(s.camera, CameraSettings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.seed = Some(1234);
        s.show_fps = true;
        let json = s.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_bad_json_is_error() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_zero_tile_spacing_is_invalid() {
        let err = Settings::from_json(r#"{"physics":{"tile_spacing":0.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid { field: "physics.tile_spacing", .. }
        ));
    }

    #[test]
    fn test_out_of_range_values_are_invalid() {
        for json in [
            r#"{"physics":{"tile_spacing":-50.0}}"#,
            r#"{"physics":{"radius":0.0}}"#,
            r#"{"camera":{"follow_smoothing":0.0}}"#,
            r#"{"camera":{"zoom_smoothing":1.5}}"#,
        ] {
            let err = Settings::from_json(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid { .. }), "{json}");
        }
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut s = Settings::default();
        assert!(s.validate().is_ok());
        s.camera.pan_speed = f32::INFINITY;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::Invalid { field: "camera.pan_speed", .. })
        ));
        s = Settings::default();
        s.physics.tile_spacing = f32::NAN;
        assert!(s.validate().is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_file_missing_is_io_error() {
        let err = Settings::load_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
