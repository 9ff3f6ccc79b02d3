//! Runtime field configuration loaded from `assets/field.toml`.
//!
//! [`FieldConfig`] is a Bevy [`Resource`] holding every motion and rendering
//! tunable of the particle field.  At startup, [`load_field_config`] reads
//! `assets/field.toml`: the optional `variant` key picks the preset
//! ([`FieldVariant::preset`]) and any other keys present in the file override
//! that preset.  Missing keys keep the preset value, so a minimal TOML can
//! override just the values you care about:
//!
//! ```toml
//! variant = "baseline"
//! connection_distance = 140.0
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source for both presets.

use std::path::Path;

use crate::constants::FIELD_CONFIG_PATH;
use crate::error::{
    validate_non_negative, validate_positive, validate_unit_interval, FieldError, FieldResult,
};
use crate::variant::FieldVariant;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Motion and rendering tunables of the particle field.
///
/// All speeds are per display frame.  Defaults are the Phantom preset.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub variant: FieldVariant,

    // ── Pointer ───────────────────────────────────────────────────────────────
    /// Distance (px) within which the pointer pushes particles away.
    pub influence_radius: f32,
    /// Velocity removed toward the pointer at full force (px/frame).
    pub push_strength: f32,
    /// Radius added at full pointer force (px).
    pub radius_gain: f32,

    // ── Motion ────────────────────────────────────────────────────────────────
    /// Fraction of velocity kept and reversed when a particle hits an edge.
    pub bounce_damping: f32,
    /// Full width of the per-axis random velocity kick (px/frame).
    pub jitter: f32,
    /// Per-axis speed cap (px/frame).
    pub max_speed: f32,
    /// Per-frame velocity retention (1.0 = no friction).
    pub friction: f32,

    // ── Spawning ──────────────────────────────────────────────────────────────
    /// Full width of the initial per-axis velocity range (px/frame).
    pub initial_speed: f32,
    /// Base radius spread above the minimum radius (px).
    pub radius_spread: f32,

    // ── Rendering ─────────────────────────────────────────────────────────────
    /// Maximum edge length between two particles (px).
    pub connection_distance: f32,
    /// Glow halo added around each disc (px).
    pub glow_radius: f32,
    /// Particle count above which edges are found through the spatial grid.
    pub grid_threshold: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldVariant::default().preset()
    }
}

impl FieldConfig {
    /// Check every tunable against its usable range.
    pub fn validate(&self) -> FieldResult<()> {
        validate_positive("influence_radius", self.influence_radius)?;
        validate_positive("max_speed", self.max_speed)?;
        validate_positive("connection_distance", self.connection_distance)?;
        validate_unit_interval("bounce_damping", self.bounce_damping)?;
        validate_unit_interval("friction", self.friction)?;
        validate_non_negative("push_strength", self.push_strength)?;
        validate_non_negative("radius_gain", self.radius_gain)?;
        validate_non_negative("jitter", self.jitter)?;
        validate_non_negative("initial_speed", self.initial_speed)?;
        validate_non_negative("radius_spread", self.radius_spread)?;
        validate_non_negative("glow_radius", self.glow_radius)?;
        Ok(())
    }

    /// Parse a config document: preset chosen by `variant`, then overridden
    /// by every other key present.
    pub fn from_toml_str(contents: &str, path: &Path) -> FieldResult<Self> {
        let overrides: toml::Value =
            toml::from_str(contents).map_err(|source| FieldError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        let variant = match overrides.get("variant") {
            None => FieldVariant::default(),
            Some(value) => value
                .as_str()
                .and_then(FieldVariant::from_name)
                .ok_or_else(|| FieldError::UnknownVariant {
                    path: path.to_path_buf(),
                    name: value.to_string(),
                })?,
        };

        let mut merged = toml::Value::try_from(variant.preset())?;
        if let (Some(base), Some(extra)) = (merged.as_table_mut(), overrides.as_table()) {
            for (key, value) in extra {
                if key != "variant" {
                    base.insert(key.clone(), value.clone());
                }
            }
        }

        let config: FieldConfig =
            merged
                .try_into()
                .map_err(|source: toml::de::Error| FieldError::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.  `Ok(None)` when the file does not exist.
    pub fn load_from_path(path: &Path) -> FieldResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, path).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(FieldError::ConfigIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Startup system: attempt to load `assets/field.toml` and overwrite the
/// `FieldConfig` resource with it.
///
/// Parse or validation errors are logged but do not abort the app.  A missing
/// file is silently ignored (defaults are already in place).
pub fn load_field_config(mut config: ResMut<FieldConfig>) {
    let path = Path::new(FIELD_CONFIG_PATH);
    match FieldConfig::load_from_path(path) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!(
                "Loaded {} field config from {}",
                config.variant.label(),
                path.display()
            );
        }
        Ok(None) => {
            info!("No {} found; using compiled defaults", path.display());
        }
        Err(e) => {
            warn!("{e}; using defaults");
        }
    }
}
