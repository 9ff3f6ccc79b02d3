//! Behavioural tests for [`ParticleField`] driven frame by frame, without Bevy
//! scheduling.
//!
//! Covered scenarios:
//! 1. Every particle stays inside the viewport and under the speed cap.
//! 2. A click burst spawns ten full-opacity transients that fade out and are
//!    gone after exactly sixty frames.
//! 3. Slow frames lower the tier one step per measurement and fast frames
//!    never raise it again.
//! 4. Settings changes converge on the next frame.
//! 5. Edge alpha, pointer range, and grid/brute-force edge agreement.
//! 6. The Baseline preset: undamped bounces, a 2 px/frame cap, 120 px edges.

use std::collections::BTreeSet;
use std::time::Duration;

use bevy::math::Vec2;
use particle_field::config::FieldConfig;
use particle_field::field::{LoopCommand, ParticleField};
use particle_field::particle::{FieldParticle, Lifetime};
use particle_field::settings::{AnimationSettings, AnimationType};
use particle_field::surface::DrawList;
use particle_field::tier::PerformanceTier;
use particle_field::variant::FieldVariant;

const FRAME_60HZ: Duration = Duration::from_millis(16);
const FRAME_10HZ: Duration = Duration::from_millis(100);

// ── Helpers ───────────────────────────────────────────────────────────────────

fn field_with(settings: AnimationSettings, config: FieldConfig, seed: u64) -> ParticleField {
    ParticleField::with_seed(800.0, 600.0, settings, config, seed)
}

fn default_field(seed: u64) -> ParticleField {
    field_with(AnimationSettings::default(), FieldConfig::default(), seed)
}

fn resting_particle(position: Vec2) -> FieldParticle {
    FieldParticle {
        position,
        velocity: Vec2::ZERO,
        base_radius: 2.0,
        radius: 2.0,
        opacity: 0.5,
        pulse_phase: 0.0,
        pulse_speed: 0.02,
        lifetime: Lifetime::Ambient,
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[test]
fn particles_stay_inside_viewport_and_under_speed_cap() {
    let mut field = default_field(11);
    let max_speed = field.config().max_speed;

    for frame in 0..600 {
        // Sweep the pointer through the field so the push-away path runs too.
        let t = frame as f32 / 600.0;
        field.on_pointer_move(800.0 * t, 300.0 + 200.0 * (t * 12.0).sin());
        if frame % 50 == 0 {
            field.on_pointer_click(800.0 * t, 300.0);
        }
        field.step(FRAME_60HZ);

        for p in field.particles() {
            assert!(
                (0.0..=800.0).contains(&p.position.x) && (0.0..=600.0).contains(&p.position.y),
                "frame {frame}: particle escaped to {:?}",
                p.position
            );
            assert!(
                p.velocity.x.abs() <= max_speed && p.velocity.y.abs() <= max_speed,
                "frame {frame}: velocity {:?} over cap",
                p.velocity
            );
        }
    }
}

#[test]
fn runaway_velocity_is_capped_in_one_frame() {
    let mut field = default_field(12);
    let runaway: Vec<_> = field
        .particles()
        .iter()
        .cloned()
        .map(|mut p| {
            p.velocity = Vec2::new(250.0, -250.0);
            p
        })
        .collect();
    field.replace_particles(runaway);
    field.step(FRAME_60HZ);

    let cap = field.config().max_speed;
    assert!(field
        .particles()
        .iter()
        .all(|p| p.velocity.x.abs() <= cap && p.velocity.y.abs() <= cap));
}

#[test]
fn pointer_beyond_influence_radius_has_no_effect() {
    let settings = AnimationSettings {
        particle_count: 1,
        ..Default::default()
    };
    let config = FieldConfig {
        jitter: 0.0,
        friction: 1.0,
        ..Default::default()
    };
    let mut field = field_with(settings, config, 13);
    field.replace_particles([resting_particle(Vec2::new(100.0, 100.0))]);

    field.on_pointer_move(300.0, 100.0);
    field.step(FRAME_60HZ);

    let p = &field.particles()[0];
    assert_eq!(p.velocity, Vec2::ZERO);
    assert_eq!(p.position, Vec2::new(100.0, 100.0));
    assert_eq!(p.radius, p.base_radius);
}

// ── Bursts ────────────────────────────────────────────────────────────────────

#[test]
fn click_spawns_ten_full_opacity_transients_at_the_pointer() {
    let mut field = default_field(14);
    field.on_pointer_click(400.0, 300.0);

    let transients: Vec<_> = field.particles().iter().filter(|p| !p.is_ambient()).collect();
    assert_eq!(transients.len(), 10);
    for p in transients {
        assert_eq!(p.position, Vec2::new(400.0, 300.0));
        assert_eq!(p.opacity, 1.0);
        assert_eq!(
            p.lifetime,
            Lifetime::Transient {
                remaining: 60,
                max: 60
            }
        );
    }
    assert_eq!(field.ambient_count(), 100);
}

#[test]
fn transients_fade_and_expire_after_sixty_frames() {
    let mut field = default_field(15);
    field.on_pointer_click(400.0, 300.0);

    let mut last_opacity = 1.0;
    for frame in 1..60 {
        field.step(FRAME_60HZ);
        assert_eq!(field.transient_count(), 10, "frame {frame}");

        let opacity = field
            .particles()
            .iter()
            .find(|p| !p.is_ambient())
            .map(|p| p.opacity)
            .unwrap();
        assert!(opacity < last_opacity, "frame {frame}: opacity must fall");
        last_opacity = opacity;
    }

    field.step(FRAME_60HZ);
    assert_eq!(field.transient_count(), 0);
    assert_eq!(field.ambient_count(), 100);
}

// ── Performance tiers ─────────────────────────────────────────────────────────

#[test]
fn slow_frames_lower_the_tier_one_step_per_measurement() {
    let mut field = default_field(16);
    assert_eq!(field.tier(), PerformanceTier::High);

    // Ten 100 ms frames close one window at 10 fps.
    for _ in 0..10 {
        field.step(FRAME_10HZ);
    }
    assert_eq!(field.tier(), PerformanceTier::Medium);
    assert_eq!(field.fps(), Some(10));
    assert_eq!(field.ambient_count(), 70);

    for _ in 0..10 {
        field.step(FRAME_10HZ);
    }
    assert_eq!(field.tier(), PerformanceTier::Low);
    assert_eq!(field.ambient_count(), 40);

    // Recovery never raises the tier.
    for _ in 0..300 {
        field.step(FRAME_60HZ);
    }
    assert_eq!(field.tier(), PerformanceTier::Low);
    assert!(field.fps().unwrap() >= 60);
}

#[test]
fn steady_frame_rate_keeps_high_tier_and_edges() {
    let mut field = default_field(17);
    for _ in 0..180 {
        field.step(FRAME_60HZ);
    }
    assert_eq!(field.tier(), PerformanceTier::High);

    let mut list = DrawList::default();
    field.render(&mut list);
    assert_eq!(list.discs.len(), 100);
    assert_eq!(list.lines.len(), field.connections().len());
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[test]
fn changed_count_and_tier_converge_on_next_frame() {
    let mut field = default_field(18);

    let more = AnimationSettings {
        particle_count: 200,
        ..Default::default()
    };
    assert_eq!(field.apply_settings(more), LoopCommand::Keep);
    field.step(FRAME_60HZ);
    assert_eq!(field.ambient_count(), 200);

    let low = AnimationSettings {
        performance: PerformanceTier::Low,
        ..more
    };
    field.apply_settings(low);
    assert_eq!(field.tier(), PerformanceTier::Low);
    field.step(FRAME_60HZ);
    assert_eq!(field.ambient_count(), 80);
}

#[test]
fn switching_animation_type_empties_and_restores_the_field() {
    let mut field = default_field(19);
    let waves = AnimationSettings {
        animation_type: AnimationType::Waves,
        ..Default::default()
    };

    assert_eq!(field.apply_settings(waves), LoopCommand::Stop);
    assert!(field.particles().is_empty());

    assert_eq!(
        field.apply_settings(AnimationSettings::default()),
        LoopCommand::Start
    );
    assert_eq!(field.ambient_count(), 100);
}

// ── Edges ─────────────────────────────────────────────────────────────────────

#[test]
fn edge_alpha_fades_with_distance() {
    let mut field = default_field(20);
    field.replace_particles([
        resting_particle(Vec2::new(100.0, 100.0)),
        resting_particle(Vec2::new(150.0, 100.0)),
        resting_particle(Vec2::new(600.0, 500.0)),
    ]);

    let mut list = DrawList::default();
    field.render(&mut list);

    assert_eq!(list.discs.len(), 3);
    assert_eq!(list.lines.len(), 1);
    let line = list.lines[0];
    assert!((line.alpha - 0.2).abs() < 1e-6, "alpha was {}", line.alpha);
    assert_eq!(line.from, Vec2::new(100.0, 100.0));
    assert_eq!(line.to, Vec2::new(150.0, 100.0));
}

#[test]
fn edges_at_exactly_connection_distance_are_not_drawn() {
    let mut field = default_field(21);
    let reach = field.config().connection_distance;
    field.replace_particles([
        resting_particle(Vec2::new(100.0, 100.0)),
        resting_particle(Vec2::new(100.0 + reach, 100.0)),
    ]);
    assert!(field.connections().is_empty());
}

#[test]
fn grid_and_brute_force_find_the_same_edges() {
    let settings = AnimationSettings {
        particle_count: 400,
        ..Default::default()
    };
    let gridded = field_with(settings, FieldConfig::default(), 22);
    let brute = field_with(
        settings,
        FieldConfig {
            grid_threshold: usize::MAX,
            ..Default::default()
        },
        22,
    );
    assert_eq!(gridded.particles(), brute.particles());

    let pairs = |field: &ParticleField| -> BTreeSet<(usize, usize)> {
        field.connections().iter().map(|e| (e.a, e.b)).collect()
    };
    let expected = pairs(&brute);
    assert!(!expected.is_empty());
    assert_eq!(pairs(&gridded), expected);
}

// ── Baseline variant ──────────────────────────────────────────────────────────

fn baseline_field(particle_count: u32, seed: u64) -> ParticleField {
    let settings = AnimationSettings {
        particle_count,
        ..AnimationSettings::for_variant(FieldVariant::Baseline)
    };
    field_with(settings, FieldVariant::Baseline.preset(), seed)
}

#[test]
fn baseline_bounce_keeps_full_speed() {
    let mut field = baseline_field(1, 23);
    let jitter = field.config().jitter;
    let mut particle = resting_particle(Vec2::new(799.0, 300.0));
    particle.velocity = Vec2::new(1.5, 0.0);
    field.replace_particles([particle]);

    field.step(FRAME_60HZ);

    let p = &field.particles()[0];
    assert_eq!(p.position.x, 800.0);
    // Only the jitter kick separates the reflected speed from the incoming one.
    assert!(
        (p.velocity.x + 1.5).abs() <= jitter * 0.5 + 1e-6,
        "bounce changed speed: {:?}",
        p.velocity
    );
}

#[test]
fn baseline_speed_stays_under_two_px_per_frame() {
    let mut field = baseline_field(80, 24);
    assert_eq!(field.config().max_speed, 2.0);

    for frame in 0..400 {
        let t = frame as f32 / 400.0;
        field.on_pointer_move(800.0 * t, 600.0 * (1.0 - t));
        field.step(FRAME_60HZ);
        for p in field.particles() {
            assert!(
                p.velocity.x.abs() <= 2.0 && p.velocity.y.abs() <= 2.0,
                "frame {frame}: velocity {:?}",
                p.velocity
            );
        }
    }
}

#[test]
fn baseline_edges_reach_120_px() {
    let mut field = baseline_field(4, 25);
    field.replace_particles([
        resting_particle(Vec2::new(100.0, 100.0)),
        resting_particle(Vec2::new(210.0, 100.0)),
        resting_particle(Vec2::new(100.0, 400.0)),
        resting_particle(Vec2::new(230.0, 400.0)),
    ]);

    let edges = field.connections();
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].a, edges[0].b), (0, 1));

    let mut list = DrawList::default();
    field.render(&mut list);
    let expected_alpha = (120.0 - 110.0) / 120.0 * 0.3;
    assert!((list.lines[0].alpha - expected_alpha).abs() < 1e-6);
}

#[test]
fn baseline_defaults_to_eighty_particles() {
    let field = field_with(
        AnimationSettings::for_variant(FieldVariant::Baseline),
        FieldVariant::Baseline.preset(),
        26,
    );
    assert_eq!(field.ambient_count(), 80);
}
