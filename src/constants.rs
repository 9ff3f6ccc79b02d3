//! Centralised particle-field constants.
//!
//! Every default the field starts from: population sizes, tier thresholds,
//! the two variant presets, and window and file locations.  `FieldConfig`
//! and `AnimationSettings` read their defaults from here.
//!
//! ## Tuning guidance
//!
//! Motion constants are expressed **per display frame**, not per second: the
//! field advances by exactly one integration step for every rendered frame.
//! Values prefixed `PHANTOM_` belong to the default variant; `BASELINE_`
//! values describe the lighter, undamped variant (see [`crate::variant`]).

// ── Population ────────────────────────────────────────────────────────────────

/// Default number of ambient particles at the `high` performance tier.
pub const DEFAULT_PARTICLE_COUNT: u32 = 100;

/// Default ambient count for the Baseline variant when none is stored.
pub const BASELINE_PARTICLE_COUNT: u32 = 80;

/// Particles spawned by a single pointer click.
pub const BURST_PARTICLE_COUNT: u32 = 10;

/// Lifetime of a burst particle (frames).
pub const BURST_LIFETIME_FRAMES: u32 = 60;

/// Per-axis speed range of a burst particle: velocity is uniform in `±BURST_SPEED`.
pub const BURST_SPEED: f32 = 5.0;

// ── Performance Tiers ─────────────────────────────────────────────────────────

/// Population scale at each tier.
pub const TIER_SCALE_HIGH: f32 = 1.0;
pub const TIER_SCALE_MEDIUM: f32 = 0.7;
pub const TIER_SCALE_LOW: f32 = 0.4;

/// Measured FPS below which `high` drops to `medium`.
pub const FPS_DOWNGRADE_HIGH: u32 = 30;

/// Measured FPS below which `medium` drops to `low`.
pub const FPS_DOWNGRADE_MEDIUM: u32 = 20;

/// Length of the FPS measurement window (milliseconds).
pub const FPS_WINDOW_MS: u64 = 1000;

// ── Ambient Pulse ─────────────────────────────────────────────────────────────

/// Ambient opacity is `PULSE_BASE + PULSE_AMPLITUDE · sin(phase)`.
pub const PULSE_BASE: f32 = 0.3;
pub const PULSE_AMPLITUDE: f32 = 0.2;

/// Per-frame phase advance is uniform in `[PULSE_SPEED_MIN, PULSE_SPEED_MIN + PULSE_SPEED_SPREAD)`.
pub const PULSE_SPEED_MIN: f32 = 0.01;
pub const PULSE_SPEED_SPREAD: f32 = 0.02;

/// Initial ambient opacity is uniform in `[OPACITY_MIN, OPACITY_MIN + OPACITY_SPREAD)`.
/// Overwritten by the pulse on the first step.
pub const OPACITY_MIN: f32 = 0.3;
pub const OPACITY_SPREAD: f32 = 0.5;

/// Smallest base radius of any particle (px).
pub const RADIUS_MIN: f32 = 1.0;

// ── Connective Edges ──────────────────────────────────────────────────────────

/// Peak alpha of an edge between two coincident particles.
pub const CONNECTION_MAX_ALPHA: f32 = 0.3;

/// Above this many particles, edge search switches from brute force to the
/// spatial grid.  Below it the O(n²) pass is cheaper than building the grid.
pub const CONNECTION_GRID_THRESHOLD: usize = 150;

// ── Phantom Variant ───────────────────────────────────────────────────────────

/// Pointer influence radius (px).
pub const PHANTOM_INFLUENCE_RADIUS: f32 = 120.0;

/// Velocity removed along the pointer direction at full force (px/frame).
pub const PHANTOM_PUSH_STRENGTH: f32 = 0.02;

/// Radius added at full pointer force (px).
pub const PHANTOM_RADIUS_GAIN: f32 = 3.0;

/// Fraction of velocity kept (and reversed) on a boundary bounce.
pub const PHANTOM_BOUNCE_DAMPING: f32 = 0.8;

/// Full width of the per-axis random velocity jitter (px/frame).
pub const PHANTOM_JITTER: f32 = 0.02;

/// Per-axis speed cap (px/frame).
pub const PHANTOM_MAX_SPEED: f32 = 3.0;

/// Multiplicative velocity retention applied every frame.
pub const PHANTOM_FRICTION: f32 = 0.99;

/// Full width of the initial per-axis velocity range (px/frame).
pub const PHANTOM_INITIAL_SPEED: f32 = 2.0;

/// Base radius spread above [`RADIUS_MIN`] (px).
pub const PHANTOM_RADIUS_SPREAD: f32 = 3.0;

/// Maximum distance at which two particles are joined by an edge (px).
pub const PHANTOM_CONNECTION_DISTANCE: f32 = 150.0;

/// Glow halo radius added around each disc (px).
pub const PHANTOM_GLOW_RADIUS: f32 = 15.0;

// ── Baseline Variant ──────────────────────────────────────────────────────────

pub const BASELINE_INFLUENCE_RADIUS: f32 = 100.0;
pub const BASELINE_PUSH_STRENGTH: f32 = 0.01;
pub const BASELINE_RADIUS_GAIN: f32 = 2.0;
/// Baseline bounces are undamped.
pub const BASELINE_BOUNCE_DAMPING: f32 = 1.0;
pub const BASELINE_JITTER: f32 = 0.01;
pub const BASELINE_MAX_SPEED: f32 = 2.0;
/// Baseline applies no friction.
pub const BASELINE_FRICTION: f32 = 1.0;
pub const BASELINE_INITIAL_SPEED: f32 = 0.5;
pub const BASELINE_RADIUS_SPREAD: f32 = 2.0;
pub const BASELINE_CONNECTION_DISTANCE: f32 = 120.0;
pub const BASELINE_GLOW_RADIUS: f32 = 10.0;

// ── Host / Rendering ──────────────────────────────────────────────────────────

/// Initial window size of the desktop host (logical px).
pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 680;

/// Font size of the stats overlay.
pub const STATS_FONT_SIZE: f32 = 14.0;

/// Number of segments used for the shared disc mesh.
pub const DISC_MESH_SIDES: u32 = 16;

/// Alpha multiplier applied to the glow halo relative to the disc.
pub const GLOW_ALPHA_FACTOR: f32 = 0.25;

/// Amount by which `+` / `-` change the particle count setting.
pub const PARTICLE_COUNT_STEP: u32 = 10;

/// Directory and key under which animation settings are persisted.
pub const SETTINGS_DIR: &str = "settings";
pub const SETTINGS_KEY: &str = "particle_settings";

/// Runtime tunables file read at startup.
pub const FIELD_CONFIG_PATH: &str = "assets/field.toml";
