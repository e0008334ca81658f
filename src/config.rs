//! Runtime flight configuration loaded from `assets/flight.toml`.
//!
//! [`FlightConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_flight_config`] reads
//! `assets/flight.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! asteroid_count = 200
//! damping = 0.95
//! ```

use crate::constants::*;
use crate::error::{SimError, SimResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Default location of the override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/flight.toml";

/// Runtime-tunable flight, mining and presentation configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    // ── Craft ─────────────────────────────────────────────────────────────────
    pub linear_acceleration: f64,
    pub angular_acceleration: f64,
    pub damping: f64,
    pub craft_model_rotation: [f64; 3],
    pub craft_model_path: String,

    // ── Mining ────────────────────────────────────────────────────────────────
    pub drain_per_tick: u32,

    // ── Asteroid Field ────────────────────────────────────────────────────────
    pub asteroid_count: usize,
    pub field_radius: f64,
    pub resource_min: u32,
    pub resource_max: u32,
    pub asteroid_scale: f32,
    pub spin_speed_min: f32,
    pub spin_speed_max: f32,
    pub asteroid_models: Vec<String>,

    // ── Celestial Bodies ──────────────────────────────────────────────────────
    pub earth_radius: f32,
    pub earth_position: [f32; 3],
    pub earth_texture_path: String,

    // ── Camera ────────────────────────────────────────────────────────────────
    pub camera_distance: f32,
    pub camera_min_distance: f32,
    pub camera_zoom_speed: f32,
    pub click_drag_threshold: f32,

    // ── HUD ───────────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            // Craft
            linear_acceleration: LINEAR_ACCELERATION,
            angular_acceleration: ANGULAR_ACCELERATION,
            damping: DAMPING,
            craft_model_rotation: CRAFT_MODEL_ROTATION,
            craft_model_path: CRAFT_MODEL_PATH.to_string(),
            // Mining
            drain_per_tick: DRAIN_PER_TICK,
            // Asteroid Field
            asteroid_count: ASTEROID_COUNT,
            field_radius: FIELD_RADIUS,
            resource_min: RESOURCE_MIN,
            resource_max: RESOURCE_MAX,
            asteroid_scale: ASTEROID_SCALE,
            spin_speed_min: SPIN_SPEED_MIN,
            spin_speed_max: SPIN_SPEED_MAX,
            asteroid_models: ASTEROID_MODELS.iter().map(|s| s.to_string()).collect(),
            // Celestial Bodies
            earth_radius: EARTH_RADIUS,
            earth_position: EARTH_POSITION,
            earth_texture_path: EARTH_TEXTURE_PATH.to_string(),
            // Camera
            camera_distance: CAMERA_DISTANCE,
            camera_min_distance: CAMERA_MIN_DISTANCE,
            camera_zoom_speed: CAMERA_ZOOM_SPEED,
            click_drag_threshold: CLICK_DRAG_THRESHOLD,
            // HUD
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl FlightConfig {
    /// Parse a TOML document, filling unspecified keys with defaults.
    pub fn from_toml_str(contents: &str, origin: &Path) -> SimResult<Self> {
        toml::from_str::<FlightConfig>(contents).map_err(|source| SimError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse `path`.  `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> SimResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, path).map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Inclusive resource range for freshly populated asteroids.
    ///
    /// A reversed range in the file is swapped rather than rejected.  The
    /// floor is 1: an asteroid born empty could never be mined or removed.
    pub fn resource_range(&self) -> std::ops::RangeInclusive<u32> {
        let lo = self.resource_min.min(self.resource_max).max(1);
        let hi = self.resource_min.max(self.resource_max).max(lo);
        lo..=hi
    }
}

/// Startup system: overwrite the [`FlightConfig`] resource from
/// `assets/flight.toml` when present.
///
/// A missing file keeps the compiled defaults.  Parse errors are logged and
/// also keep the defaults; they never abort startup.
pub fn load_flight_config(mut config: ResMut<FlightConfig>) {
    let path = Path::new(CONFIG_PATH);
    match FlightConfig::load(path) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded flight config from {CONFIG_PATH}");
        }
        Ok(None) => info!("No {CONFIG_PATH} found; using compiled defaults"),
        Err(e) => warn!("{e}; using defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = FlightConfig::from_toml_str("", Path::new("flight.toml")).unwrap();
        assert_eq!(cfg.asteroid_count, ASTEROID_COUNT);
        assert_eq!(cfg.damping, DAMPING);
        assert_eq!(cfg.asteroid_models.len(), ASTEROID_MODELS.len());
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let cfg = FlightConfig::from_toml_str(
            "asteroid_count = 12\ndamping = 0.5\nearth_position = [1.0, 2.0, 3.0]\n",
            Path::new("flight.toml"),
        )
        .unwrap();
        assert_eq!(cfg.asteroid_count, 12);
        assert_eq!(cfg.damping, 0.5);
        assert_eq!(cfg.earth_position, [1.0, 2.0, 3.0]);
        assert_eq!(cfg.linear_acceleration, LINEAR_ACCELERATION);
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = FlightConfig::from_toml_str("damping = \"fast\"", Path::new("flight.toml"))
            .unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let loaded = FlightConfig::load(Path::new("assets/definitely-missing.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn reversed_resource_range_is_normalised() {
        let cfg = FlightConfig {
            resource_min: 50,
            resource_max: 20,
            ..Default::default()
        };
        assert_eq!(cfg.resource_range(), 20..=50);
    }

    #[test]
    fn resource_range_floor_is_one() {
        let zero_min = FlightConfig {
            resource_min: 0,
            resource_max: 20,
            ..Default::default()
        };
        assert_eq!(zero_min.resource_range(), 1..=20);

        let all_zero = FlightConfig {
            resource_min: 0,
            resource_max: 0,
            ..Default::default()
        };
        assert_eq!(all_zero.resource_range(), 1..=1);
    }
}
