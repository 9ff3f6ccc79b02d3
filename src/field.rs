//! The particle field: an owned set of particles in a 2D viewport.
//!
//! ## Frame pipeline
//!
//! [`ParticleField::step`] advances the field by exactly one display frame:
//!
//! | Stage | Applies to | Effect                                                  |
//! |-------|------------|---------------------------------------------------------|
//! | 1     | ambient    | Pointer push-away and radius inflation                  |
//! | 2     | all        | Integrate position, bounce off and clamp to the edges   |
//! | 3     | all        | Random drift, per-axis speed cap, friction              |
//! | 4     | all        | Pulse / fade opacity, drop expired transients           |
//! | 5     | ambient    | Top up or trim to the tier's target count               |
//! | 6     | field      | FPS window; downgrade tier when the frame rate is low   |
//!
//! [`ParticleField::render`] then draws discs, plus connective edges while the
//! tier is `high`.
//!
//! The field never fails: bad inputs shrink or empty the field instead.

use std::time::Duration;

use crate::config::FieldConfig;
use crate::constants::{BURST_PARTICLE_COUNT, CONNECTION_MAX_ALPHA};
use crate::particle::FieldParticle;
use crate::settings::{AnimationSettings, AnimationType};
use crate::spatial_partition::SpatialGrid;
use crate::surface::FieldSurface;
use crate::theme::Theme;
use crate::tier::{FpsMeter, PerformanceTier};
use bevy::log::{debug, info};
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A pair of particles close enough to be joined by a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

/// What the animation loop should do after a settings change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    Start,
    Stop,
    Keep,
}

pub struct ParticleField {
    config: FieldConfig,
    settings: AnimationSettings,
    viewport: Vec2,
    pointer: Vec2,
    particles: Vec<FieldParticle>,
    tier: PerformanceTier,
    fps: FpsMeter,
    theme: Theme,
    rng: StdRng,
}

impl ParticleField {
    /// Field seeded from system entropy.
    pub fn new(width: f32, height: f32, settings: AnimationSettings, config: FieldConfig) -> Self {
        Self::with_rng(width, height, settings, config, StdRng::from_entropy())
    }

    /// Deterministic field for reproducible runs.
    pub fn with_seed(
        width: f32,
        height: f32,
        settings: AnimationSettings,
        config: FieldConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(width, height, settings, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        width: f32,
        height: f32,
        settings: AnimationSettings,
        config: FieldConfig,
        rng: StdRng,
    ) -> Self {
        let mut field = Self {
            config,
            settings,
            viewport: Vec2::ZERO,
            pointer: Vec2::ZERO,
            particles: Vec::new(),
            tier: settings.performance,
            fps: FpsMeter::default(),
            theme: Theme::default(),
            rng,
        };
        field.initialize(width, height, settings);
        field
    }

    // ── Operations ───────────────────────────────────────────────────────────

    /// Discard every particle and spawn the ambient population for the current
    /// tier.  Non-particle animation modes leave the field empty.
    pub fn initialize(&mut self, width: f32, height: f32, settings: AnimationSettings) {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
        self.settings = settings;
        self.particles.clear();

        let target = self.target_count();
        self.particles.reserve(target);
        for _ in 0..target {
            self.spawn_ambient();
        }
        debug!(
            "Field initialised: {}x{} with {} particles ({})",
            self.viewport.x,
            self.viewport.y,
            target,
            self.tier.label()
        );
    }

    /// New viewport bounds; the particle set is rebuilt from scratch.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.initialize(width, height, self.settings);
    }

    /// Remember the pointer; it takes effect on the next [`step`](Self::step).
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Burst of short-lived particles at `(x, y)`.
    pub fn on_pointer_click(&mut self, x: f32, y: f32) {
        let origin = Vec2::new(x, y);
        for _ in 0..BURST_PARTICLE_COUNT {
            let particle = FieldParticle::burst(&mut self.rng, origin, &self.config);
            self.particles.push(particle);
        }
    }

    /// Advance the simulation by one display frame that took `dt` of wall time.
    pub fn step(&mut self, dt: Duration) {
        let bounds = self.viewport;
        let pointer = self.pointer;

        for particle in &mut self.particles {
            if particle.is_ambient() {
                particle.apply_pointer(pointer, &self.config);
            }
            particle.integrate(bounds, &self.config);
            particle.perturb(&mut self.rng, &self.config);
            particle.age();
        }
        self.particles.retain(FieldParticle::is_alive);

        self.reconcile_population();

        if let Some(fps) = self.fps.tick(dt) {
            let next = self.tier.after_measurement(fps);
            if next != self.tier {
                info!(
                    "Performance tier lowered from {} to {} at {} fps",
                    self.tier.label(),
                    next.label(),
                    fps
                );
                self.tier = next;
                self.reconcile_population();
            }
        }
    }

    /// Draw the current frame: a glowing disc per particle, then connective
    /// edges while the tier allows them.
    pub fn render<S: FieldSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        let color = self.theme.color(self.config.variant);
        for particle in &self.particles {
            surface.fill_circle(
                particle.position,
                particle.radius,
                color,
                particle.opacity.clamp(0.0, 1.0),
                self.config.glow_radius,
            );
        }

        if !self.tier.draws_connections() {
            return;
        }

        let max_distance = self.config.connection_distance;
        for edge in self.connections() {
            let alpha = (max_distance - edge.distance) / max_distance * CONNECTION_MAX_ALPHA;
            surface.line(
                self.particles[edge.a].position,
                self.particles[edge.b].position,
                color,
                alpha,
            );
        }
    }

    /// Push a new display theme.  Only the colour changes.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Adopt new user settings.
    ///
    /// A changed particle count or performance tier converges on the next
    /// `step`.  An explicit performance setting replaces the current tier,
    /// which is the only way back up after a downgrade.  The returned command
    /// tells the caller whether to start or stop the animation loop.
    pub fn apply_settings(&mut self, settings: AnimationSettings) -> LoopCommand {
        let previous = self.settings;
        self.settings = settings;

        if settings.performance != previous.performance {
            self.tier = settings.performance;
            self.fps.reset();
        }

        match (previous.runs_particles(), settings.runs_particles()) {
            (false, true) => {
                self.initialize(self.viewport.x, self.viewport.y, settings);
                LoopCommand::Start
            }
            (true, false) => {
                if settings.animation_type != AnimationType::Particles {
                    self.particles.clear();
                }
                LoopCommand::Stop
            }
            _ => LoopCommand::Keep,
        }
    }

    /// Every pair of particles closer than the connection distance.
    ///
    /// Brute force for small fields; the spatial grid once the particle count
    /// exceeds `grid_threshold`.  Both return the same set of pairs.
    pub fn connections(&self) -> Vec<Edge> {
        let max_distance = self.config.connection_distance;
        let mut edges = Vec::new();
        let mut consider = |a: usize, b: usize| {
            let distance = self.particles[a]
                .position
                .distance(self.particles[b].position);
            if distance < max_distance {
                edges.push(Edge { a, b, distance });
            }
        };

        if self.particles.len() <= self.config.grid_threshold {
            for a in 0..self.particles.len() {
                for b in (a + 1)..self.particles.len() {
                    consider(a, b);
                }
            }
        } else {
            let mut grid = SpatialGrid::new(max_distance);
            grid.rebuild(self.particles.iter().map(|p| p.position));
            for (a, b) in grid.candidate_pairs() {
                consider(a, b);
            }
        }

        edges
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn particles(&self) -> &[FieldParticle] {
        &self.particles
    }

    /// Swap in a hand-placed particle set, for tests and reproductions.
    /// Positions are clamped into the viewport and expired transients dropped.
    #[doc(hidden)]
    pub fn replace_particles(&mut self, particles: impl IntoIterator<Item = FieldParticle>) {
        let bounds = self.viewport;
        self.particles = particles
            .into_iter()
            .filter(FieldParticle::is_alive)
            .map(|mut p| {
                p.position = p.position.clamp(Vec2::ZERO, bounds);
                p
            })
            .collect();
    }

    pub fn tier(&self) -> PerformanceTier {
        self.tier
    }

    /// Most recent one-second frame count.
    pub fn fps(&self) -> Option<u32> {
        self.fps.fps()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn settings(&self) -> AnimationSettings {
        self.settings
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Ambient population the field converges to.
    pub fn target_count(&self) -> usize {
        if self.settings.animation_type != AnimationType::Particles {
            return 0;
        }
        self.tier.target_count(self.settings.particle_count)
    }

    pub fn ambient_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_ambient()).count()
    }

    pub fn transient_count(&self) -> usize {
        self.particles.len() - self.ambient_count()
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn spawn_ambient(&mut self) {
        let particle = FieldParticle::ambient(&mut self.rng, self.viewport, &self.config);
        self.particles.push(particle);
    }

    /// Add or drop ambient particles until the target is met.  Transient
    /// particles are never touched.
    fn reconcile_population(&mut self) {
        let target = self.target_count();
        let ambient = self.ambient_count();

        if ambient < target {
            for _ in ambient..target {
                self.spawn_ambient();
            }
        } else if ambient > target {
            let mut keep = target;
            self.particles.retain(|p| {
                if !p.is_ambient() {
                    return true;
                }
                if keep > 0 {
                    keep -= 1;
                    true
                } else {
                    false
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_800x600(seed: u64) -> ParticleField {
        ParticleField::with_seed(
            800.0,
            600.0,
            AnimationSettings::default(),
            FieldConfig::default(),
            seed,
        )
    }

    #[test]
    fn initialize_spawns_target_count_inside_viewport() {
        let field = field_800x600(1);
        assert_eq!(field.particles().len(), 100);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= 800.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 600.0);
        }
    }

    #[test]
    fn resize_rebuilds_particle_set() {
        let mut field = field_800x600(2);
        field.on_pointer_click(10.0, 10.0);
        field.resize(200.0, 100.0);

        assert_eq!(field.viewport(), Vec2::new(200.0, 100.0));
        assert_eq!(field.transient_count(), 0);
        assert_eq!(field.ambient_count(), 100);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.position.x <= 200.0 && p.position.y <= 100.0));
    }

    #[test]
    fn non_particle_modes_leave_the_field_empty() {
        let settings = AnimationSettings {
            animation_type: AnimationType::Waves,
            ..Default::default()
        };
        let field =
            ParticleField::with_seed(800.0, 600.0, settings, FieldConfig::default(), 3);
        assert!(field.particles().is_empty());
        assert_eq!(field.target_count(), 0);
    }

    #[test]
    fn zero_sized_viewport_does_not_panic() {
        let mut field =
            ParticleField::with_seed(0.0, 0.0, AnimationSettings::default(), FieldConfig::default(), 4);
        field.step(Duration::from_millis(16));
        assert!(field.particles().iter().all(|p| p.position == Vec2::ZERO));
    }

    #[test]
    fn edges_are_skipped_below_high_tier() {
        let settings = AnimationSettings {
            performance: PerformanceTier::Medium,
            ..Default::default()
        };
        let field = ParticleField::with_seed(100.0, 100.0, settings, FieldConfig::default(), 5);
        let mut list = crate::surface::DrawList::default();
        field.render(&mut list);

        assert_eq!(list.discs.len(), 70);
        assert!(list.lines.is_empty());
    }

    #[test]
    fn replaced_particles_are_clamped_into_the_viewport() {
        let mut field = field_800x600(7);
        let mut outside = field.particles()[0].clone();
        outside.position = Vec2::new(-50.0, 900.0);
        let mut expired = outside.clone();
        expired.lifetime = crate::particle::Lifetime::Transient {
            remaining: 0,
            max: 60,
        };

        field.replace_particles([outside, expired]);
        assert_eq!(field.particles().len(), 1);
        assert_eq!(field.particles()[0].position, Vec2::new(0.0, 600.0));
    }

    #[test]
    fn disabling_stops_without_discarding_particles() {
        let mut field = field_800x600(6);
        let cmd = field.apply_settings(AnimationSettings::default().toggled());
        assert_eq!(cmd, LoopCommand::Stop);
        assert_eq!(field.particles().len(), 100);

        let cmd = field.apply_settings(AnimationSettings::default());
        assert_eq!(cmd, LoopCommand::Start);
    }
}
