//! Parameter presets for the two flavours of the particle field.
//!
//! The *Phantom* variant is the default: damped bounces, friction, a faster
//! speed cap and a wider pointer/edge radius.  The *Baseline* variant keeps the
//! lighter behaviour (undamped bounces, no friction).  Both share one
//! implementation; only the numbers in [`FieldConfig`] differ.

use crate::config::FieldConfig;
use crate::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldVariant {
    Baseline,
    #[default]
    Phantom,
}

impl FieldVariant {
    /// Full set of tunables for this variant.
    pub fn preset(self) -> FieldConfig {
        match self {
            FieldVariant::Phantom => FieldConfig {
                variant: self,
                influence_radius: PHANTOM_INFLUENCE_RADIUS,
                push_strength: PHANTOM_PUSH_STRENGTH,
                radius_gain: PHANTOM_RADIUS_GAIN,
                bounce_damping: PHANTOM_BOUNCE_DAMPING,
                jitter: PHANTOM_JITTER,
                max_speed: PHANTOM_MAX_SPEED,
                friction: PHANTOM_FRICTION,
                initial_speed: PHANTOM_INITIAL_SPEED,
                radius_spread: PHANTOM_RADIUS_SPREAD,
                connection_distance: PHANTOM_CONNECTION_DISTANCE,
                glow_radius: PHANTOM_GLOW_RADIUS,
                grid_threshold: CONNECTION_GRID_THRESHOLD,
            },
            FieldVariant::Baseline => FieldConfig {
                variant: self,
                influence_radius: BASELINE_INFLUENCE_RADIUS,
                push_strength: BASELINE_PUSH_STRENGTH,
                radius_gain: BASELINE_RADIUS_GAIN,
                bounce_damping: BASELINE_BOUNCE_DAMPING,
                jitter: BASELINE_JITTER,
                max_speed: BASELINE_MAX_SPEED,
                friction: BASELINE_FRICTION,
                initial_speed: BASELINE_INITIAL_SPEED,
                radius_spread: BASELINE_RADIUS_SPREAD,
                connection_distance: BASELINE_CONNECTION_DISTANCE,
                glow_radius: BASELINE_GLOW_RADIUS,
                grid_threshold: CONNECTION_GRID_THRESHOLD,
            },
        }
    }

    /// Ambient particle count used when the user has not chosen one.
    pub fn default_particle_count(self) -> u32 {
        match self {
            FieldVariant::Phantom => DEFAULT_PARTICLE_COUNT,
            FieldVariant::Baseline => BASELINE_PARTICLE_COUNT,
        }
    }

    /// Parse the lowercase name used in `field.toml`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "baseline" => Some(FieldVariant::Baseline),
            "phantom" => Some(FieldVariant::Phantom),
            _ => None,
        }
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            FieldVariant::Baseline => "baseline",
            FieldVariant::Phantom => "phantom",
        }
    }
}
