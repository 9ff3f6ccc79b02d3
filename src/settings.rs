//! User-facing animation settings and their persistence.
//!
//! Settings live in a small key-value store: one TOML document per key under a
//! settings directory (`settings/particle_settings.toml` by default).  Loading
//! is forgiving: every field is read on its own, so a missing or malformed
//! field falls back to its default without discarding the rest of the file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_PARTICLE_COUNT, SETTINGS_DIR, SETTINGS_KEY};
use crate::error::{FieldError, FieldResult};
use crate::tier::PerformanceTier;
use crate::variant::FieldVariant;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which background renderer is active.  Only `Particles` is simulated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    #[default]
    Particles,
    Waves,
    Geometric,
}

impl AnimationType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "particles" => Some(AnimationType::Particles),
            "waves" => Some(AnimationType::Waves),
            "geometric" => Some(AnimationType::Geometric),
            _ => None,
        }
    }
}

/// Persisted animation preferences.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSettings {
    pub enabled: bool,
    pub animation_type: AnimationType,
    /// Ambient particle count at the `high` tier.  Always > 0.
    pub particle_count: u32,
    /// Starting (or user-selected) performance tier.
    pub performance: PerformanceTier,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            animation_type: AnimationType::Particles,
            particle_count: DEFAULT_PARTICLE_COUNT,
            performance: PerformanceTier::High,
        }
    }
}

impl AnimationSettings {
    /// Defaults for a field running `variant`: only the particle count differs.
    pub fn for_variant(variant: FieldVariant) -> Self {
        Self {
            particle_count: variant.default_particle_count(),
            ..Self::default()
        }
    }

    /// Whether the particle simulation should be running.
    #[inline]
    pub fn runs_particles(&self) -> bool {
        self.enabled && self.animation_type == AnimationType::Particles
    }

    /// Copy with `enabled` flipped.
    pub fn toggled(self) -> Self {
        Self {
            enabled: !self.enabled,
            ..self
        }
    }

    /// Build settings from a parsed document, field by field.
    ///
    /// Anything missing, of the wrong type, or out of range keeps its value
    /// from `defaults`.
    pub fn from_toml_value(value: &toml::Value, defaults: Self) -> Self {
        let enabled = value
            .get("enabled")
            .and_then(toml::Value::as_bool)
            .unwrap_or(defaults.enabled);

        let animation_type = value
            .get("animation_type")
            .and_then(toml::Value::as_str)
            .and_then(AnimationType::from_name)
            .unwrap_or(defaults.animation_type);

        let particle_count = value
            .get("particle_count")
            .and_then(toml::Value::as_integer)
            .filter(|&count| count > 0)
            .and_then(|count| u32::try_from(count).ok())
            .unwrap_or(defaults.particle_count);

        let performance = value
            .get("performance")
            .and_then(toml::Value::as_str)
            .and_then(PerformanceTier::from_name)
            .unwrap_or(defaults.performance);

        Self {
            enabled,
            animation_type,
            particle_count,
            performance,
        }
    }
}

/// File-backed key-value store holding [`AnimationSettings`] under a fixed key.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SETTINGS_DIR)
    }
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the settings document.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{SETTINGS_KEY}.toml"))
    }

    /// Read the stored settings.  `Ok(None)` when nothing has been stored yet.
    pub fn try_load(&self, defaults: AnimationSettings) -> FieldResult<Option<AnimationSettings>> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(FieldError::SettingsIo { path, source }),
        };

        let value: toml::Value =
            toml::from_str(&contents).map_err(|err| FieldError::SettingsParse {
                path: path.clone(),
                message: err.to_string(),
            })?;

        if !value.is_table() {
            return Err(FieldError::SettingsParse {
                path,
                message: "settings root must be a TOML table".to_string(),
            });
        }

        Ok(Some(AnimationSettings::from_toml_value(&value, defaults)))
    }

    /// Read the stored settings, substituting `defaults` for anything unusable.
    pub fn load(&self, defaults: AnimationSettings) -> AnimationSettings {
        match self.try_load(defaults) {
            Ok(Some(settings)) => settings,
            Ok(None) => defaults,
            Err(e) => {
                warn!("{e}; using default animation settings");
                defaults
            }
        }
    }

    pub fn save(&self, settings: &AnimationSettings) -> FieldResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| FieldError::SettingsIo {
            path: self.dir.clone(),
            source,
        })?;

        let serialized = toml::to_string_pretty(settings)?;
        let path = self.path();
        fs::write(&path, serialized).map_err(|source| FieldError::SettingsIo { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> SettingsStore {
        let dir = std::env::temp_dir().join(format!(
            "particle_field_settings_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        SettingsStore::new(dir)
    }

    #[test]
    fn missing_store_loads_defaults() {
        let store = scratch_store("missing");
        let defaults = AnimationSettings::default();
        assert_eq!(store.try_load(defaults).unwrap(), None);
        assert_eq!(store.load(defaults), defaults);
    }

    #[test]
    fn saved_settings_load_back() {
        let store = scratch_store("roundtrip");
        let settings = AnimationSettings {
            enabled: false,
            animation_type: AnimationType::Waves,
            particle_count: 42,
            performance: PerformanceTier::Low,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load(AnimationSettings::default()), settings);
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn invalid_fields_fall_back_individually() {
        let doc: toml::Value = toml::from_str(
            "enabled = \"yes\"\nanimation_type = \"geometric\"\nparticle_count = 0\nperformance = \"ultra\"\n",
        )
        .unwrap();
        let defaults = AnimationSettings::default();
        let settings = AnimationSettings::from_toml_value(&doc, defaults);

        assert_eq!(settings.enabled, defaults.enabled);
        assert_eq!(settings.animation_type, AnimationType::Geometric);
        assert_eq!(settings.particle_count, defaults.particle_count);
        assert_eq!(settings.performance, defaults.performance);
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let store = scratch_store("corrupt");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path(), "enabled = [").unwrap();

        let defaults = AnimationSettings::default();
        assert!(matches!(
            store.try_load(defaults),
            Err(FieldError::SettingsParse { .. })
        ));
        assert_eq!(store.load(defaults), defaults);
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn baseline_defaults_apply_only_where_nothing_is_stored() {
        let store = scratch_store("baseline");
        let baseline = AnimationSettings::for_variant(FieldVariant::Baseline);
        assert_eq!(store.load(baseline).particle_count, 80);

        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path(), "enabled = false\n").unwrap();
        let loaded = store.load(baseline);
        assert!(!loaded.enabled);
        assert_eq!(loaded.particle_count, 80);

        fs::write(store.path(), "particle_count = 120\n").unwrap();
        assert_eq!(store.load(baseline).particle_count, 120);
        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn only_enabled_particles_mode_runs() {
        let mut settings = AnimationSettings::default();
        assert!(settings.runs_particles());
        settings.animation_type = AnimationType::Waves;
        assert!(!settings.runs_particles());
        settings.animation_type = AnimationType::Particles;
        assert!(!settings.toggled().runs_particles());
    }
}
