//! Drawing surface abstraction for the particle field.
//!
//! [`crate::field::ParticleField::render`] issues immediate-mode calls against
//! a [`FieldSurface`].  The app records them into a [`DrawList`] that the
//! Bevy rendering systems consume; tests inspect the same list.

use bevy::math::Vec2;
use bevy::prelude::Color;

/// Something the field can draw onto.  Coordinates are viewport pixels.
pub trait FieldSurface {
    /// Discard everything drawn in the previous frame.
    fn clear(&mut self);

    /// Filled disc with a soft halo `glow` pixels wide.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32);

    /// One-pixel line.
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscCommand {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
    pub glow: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCommand {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
    pub alpha: f32,
}

/// Recording surface: keeps one frame's worth of draw calls.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub discs: Vec<DiscCommand>,
    pub lines: Vec<LineCommand>,
}

impl DrawList {
    pub fn is_empty(&self) -> bool {
        self.discs.is_empty() && self.lines.is_empty()
    }
}

impl FieldSurface for DrawList {
    fn clear(&mut self) {
        // Keep capacity: the frame size is roughly stable.
        self.discs.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32) {
        self.discs.push(DiscCommand {
            center,
            radius,
            color,
            alpha,
            glow,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32) {
        self.lines.push(LineCommand {
            from,
            to,
            color,
            alpha,
        });
    }
}
