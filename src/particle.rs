//! A single simulated point of the particle field.
//!
//! Every rule here works on one particle in isolation; [`crate::field`] drives
//! them in order once per display frame.  Positions are viewport coordinates
//! (origin top-left, y down) and speeds are per frame.

use std::f32::consts::TAU;

use crate::config::FieldConfig;
use crate::constants::*;
use bevy::math::Vec2;
use rand::Rng;

/// How long a particle lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Part of the steady-state field; never expires.
    Ambient,
    /// Spawned by a click burst; removed when `remaining` reaches zero.
    Transient { remaining: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldParticle {
    pub position: Vec2,
    /// Velocity (px/frame).
    pub velocity: Vec2,
    /// Resting radius (px).
    pub base_radius: f32,
    /// Current radius, inflated near the pointer.
    pub radius: f32,
    /// Draw opacity in `[0, 1]`.
    pub opacity: f32,
    /// Ambient pulse phase (rad).
    pub pulse_phase: f32,
    /// Per-frame pulse phase advance (rad).
    pub pulse_speed: f32,
    pub lifetime: Lifetime,
}

impl FieldParticle {
    /// Random ambient particle somewhere inside `bounds`.
    pub fn ambient<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, config: &FieldConfig) -> Self {
        let position = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * config.initial_speed,
            (rng.gen::<f32>() - 0.5) * config.initial_speed,
        );
        let base_radius = RADIUS_MIN + rng.gen::<f32>() * config.radius_spread;

        Self {
            position,
            velocity,
            base_radius,
            radius: base_radius,
            opacity: OPACITY_MIN + rng.gen::<f32>() * OPACITY_SPREAD,
            pulse_phase: rng.gen::<f32>() * TAU,
            pulse_speed: PULSE_SPEED_MIN + rng.gen::<f32>() * PULSE_SPEED_SPREAD,
            lifetime: Lifetime::Ambient,
        }
    }

    /// Short-lived burst particle at `origin` flying outward with per-axis
    /// speed uniform in `±BURST_SPEED`.
    pub fn burst<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, config: &FieldConfig) -> Self {
        let velocity = Vec2::new(
            (rng.gen::<f32>() - 0.5) * 2.0 * BURST_SPEED,
            (rng.gen::<f32>() - 0.5) * 2.0 * BURST_SPEED,
        );
        let base_radius = RADIUS_MIN + rng.gen::<f32>() * config.radius_spread;

        Self {
            position: origin,
            velocity,
            base_radius,
            radius: base_radius,
            opacity: 1.0,
            pulse_phase: 0.0,
            pulse_speed: 0.0,
            lifetime: Lifetime::Transient {
                remaining: BURST_LIFETIME_FRAMES,
                max: BURST_LIFETIME_FRAMES,
            },
        }
    }

    #[inline]
    pub fn is_ambient(&self) -> bool {
        matches!(self.lifetime, Lifetime::Ambient)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        match self.lifetime {
            Lifetime::Ambient => true,
            Lifetime::Transient { remaining, .. } => remaining > 0,
        }
    }

    /// Push the particle away from `pointer` and inflate it when within the
    /// influence radius; otherwise restore the base radius.
    ///
    /// Velocity is *decremented* along the unit vector toward the pointer, so
    /// nearby particles drift away from it.  Returns `true` when influenced.
    pub fn apply_pointer(&mut self, pointer: Vec2, config: &FieldConfig) -> bool {
        let delta = pointer - self.position;
        let distance = delta.length();

        if distance < config.influence_radius {
            let force = 1.0 - distance / config.influence_radius;
            // Exactly on the pointer there is no direction to push along.
            self.velocity -= delta.normalize_or_zero() * force * config.push_strength;
            self.radius = self.base_radius + force * config.radius_gain;
            true
        } else {
            self.radius = self.base_radius;
            false
        }
    }

    /// Move by one frame of velocity, bouncing off the viewport edges.
    pub fn integrate(&mut self, bounds: Vec2, config: &FieldConfig) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > bounds.x {
            self.velocity.x *= -config.bounce_damping;
        }
        if self.position.y < 0.0 || self.position.y > bounds.y {
            self.velocity.y *= -config.bounce_damping;
        }

        self.position = self.position.clamp(Vec2::ZERO, bounds);
    }

    /// Random drift, per-axis speed cap, then friction.
    pub fn perturb<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &FieldConfig) {
        self.velocity.x += (rng.gen::<f32>() - 0.5) * config.jitter;
        self.velocity.y += (rng.gen::<f32>() - 0.5) * config.jitter;

        let cap = Vec2::splat(config.max_speed);
        self.velocity = self.velocity.clamp(-cap, cap) * config.friction;
    }

    /// Advance the opacity: pulse for ambient particles, linear fade-out and
    /// countdown for transient ones.
    pub fn age(&mut self) {
        match &mut self.lifetime {
            Lifetime::Ambient => {
                self.pulse_phase = (self.pulse_phase + self.pulse_speed) % TAU;
                self.opacity = PULSE_BASE + PULSE_AMPLITUDE * self.pulse_phase.sin();
            }
            Lifetime::Transient { remaining, max } => {
                *remaining = remaining.saturating_sub(1);
                self.opacity = *remaining as f32 / (*max).max(1) as f32;
            }
        }
    }
}
