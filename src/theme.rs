//! Display themes and their particle colours.
//!
//! The theme is pushed in from outside the field and only selects a colour;
//! it has no other behavioural effect.

use crate::variant::FieldVariant;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Cyberpunk,
    Matrix,
    Aqua,
    Hyprland,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Dark,
        Theme::Light,
        Theme::Cyberpunk,
        Theme::Matrix,
        Theme::Aqua,
        Theme::Hyprland,
    ];

    /// Parse a theme identifier.  Unknown identifiers fall back to `Dark`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            "cyberpunk" => Theme::Cyberpunk,
            "matrix" => Theme::Matrix,
            "aqua" => Theme::Aqua,
            "hyprland" => Theme::Hyprland,
            _ => Theme::Dark,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Matrix => "matrix",
            Theme::Aqua => "aqua",
            Theme::Hyprland => "hyprland",
        }
    }

    /// Next theme in [`Theme::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Theme::ALL.iter().position(|&t| t == self).unwrap_or(0);
        Theme::ALL[(idx + 1) % Theme::ALL.len()]
    }

    /// Opaque particle colour as sRGB bytes.
    ///
    /// The Phantom palette only distinguishes dark and light; every other theme
    /// uses its dark colour.
    pub fn rgb(self, variant: FieldVariant) -> [u8; 3] {
        match variant {
            FieldVariant::Phantom => match self {
                Theme::Light => [0x63, 0x66, 0xf1],
                _ => [0x8b, 0x5c, 0xf6],
            },
            FieldVariant::Baseline => match self {
                Theme::Dark => [0x00, 0xe0, 0xff],
                Theme::Light => [0x00, 0x7a, 0xff],
                Theme::Cyberpunk => [0xf7, 0xff, 0x00],
                Theme::Matrix => [0x00, 0xff, 0x00],
                Theme::Aqua => [0x00, 0xf2, 0xff],
                Theme::Hyprland => [0xbb, 0x9a, 0xf7],
            },
        }
    }

    /// Particle colour for this theme and variant.
    pub fn color(self, variant: FieldVariant) -> Color {
        let [r, g, b] = self.rgb(variant);
        Color::srgb_u8(r, g, b)
    }
}
