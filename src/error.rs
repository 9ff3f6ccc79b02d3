//! Error types for the persistence and configuration layer.
//!
//! The simulation itself never fails: it degrades to fewer particles or no
//! edges instead.  Only the code that touches the filesystem returns
//! [`FieldError`], and its callers log the error and fall back to defaults.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::{FieldError, FieldResult};
//!
//! fn read_settings(path: &Path) -> FieldResult<String> {
//!     std::fs::read_to_string(path).map_err(|source| FieldError::SettingsIo {
//!         path: path.to_path_buf(),
//!         source,
//!     })
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Top-level error enum for the particle field.
#[derive(Debug)]
pub enum FieldError {
    /// Reading or writing the settings file failed.
    SettingsIo {
        /// File or directory being accessed.
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file exists but is not a TOML table.
    SettingsParse {
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Settings could not be encoded as TOML.
    SettingsSerialize(toml::ser::Error),

    /// Reading the runtime tunables file failed.
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The tunables file names a variant that does not exist.
    UnknownVariant {
        path: PathBuf,
        /// The `variant` value as written in the file.
        name: String,
    },

    /// The runtime tunables file could not be parsed.
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A tunable is outside its usable range.
    InvalidValue {
        /// Name of the offending field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::SettingsIo { path, source } => {
                write!(f, "settings I/O failed for {}: {}", path.display(), source)
            }
            FieldError::SettingsParse { path, message } => {
                write!(f, "failed to parse settings {}: {}", path.display(), message)
            }
            FieldError::SettingsSerialize(err) => {
                write!(f, "failed to serialize settings: {}", err)
            }
            FieldError::ConfigIo { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            FieldError::UnknownVariant { path, name } => write!(
                f,
                "unknown variant {} in {} (expected \"phantom\" or \"baseline\")",
                name,
                path.display()
            ),
            FieldError::ConfigParse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            FieldError::InvalidValue {
                name,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is outside accepted range {}",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::SettingsIo { source, .. } | FieldError::ConfigIo { source, .. } => {
                Some(source)
            }
            FieldError::SettingsSerialize(err) => Some(err),
            FieldError::ConfigParse { source, .. } => Some(source),
            FieldError::SettingsParse { .. }
            | FieldError::UnknownVariant { .. }
            | FieldError::InvalidValue { .. } => None,
        }
    }
}

impl From<toml::ser::Error> for FieldError {
    fn from(err: toml::ser::Error) -> Self {
        FieldError::SettingsSerialize(err)
    }
}

/// Convenience alias: a `Result` using `FieldError` as the error type.
pub type FieldResult<T> = Result<T, FieldError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn validate_positive(name: &'static str, value: f32) -> FieldResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidValue {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is zero or positive and finite.
pub fn validate_non_negative(name: &'static str, value: f32) -> FieldResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidValue {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` lies in `[0.0, 1.0]`.
pub fn validate_unit_interval(name: &'static str, value: f32) -> FieldResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::InvalidValue {
            name,
            value,
            expected: "[0.0, 1.0]",
        })
    }
}
