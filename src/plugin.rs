//! Bevy integration of the particle field.
//!
//! ## Design
//!
//! The world owns exactly one [`ParticleFieldState`].  Nothing reaches it
//! through globals: input, theme and settings changes arrive as messages and
//! are applied by the systems below, strictly between frames.
//!
//! | System                           | Schedule | Purpose                                  |
//! |----------------------------------|----------|------------------------------------------|
//! | `load_field_config`              | Startup  | Read `assets/field.toml`                 |
//! | `setup_field_system`             | Startup  | Load settings, size the field, start loop|
//! | `apply_viewport_messages_system` | Update   | Resize (full reinit) on viewport change  |
//! | `apply_pointer_messages_system`  | Update   | Track pointer, spawn click bursts        |
//! | `apply_theme_messages_system`    | Update   | Switch display colour                    |
//! | `apply_settings_messages_system` | Update   | Persist settings, start/stop the loop    |
//! | `animation_frame_system`         | Update   | Service the pending frame request        |

use crate::animation::{AnimationLoop, FrameQueue};
use crate::config::{load_field_config, FieldConfig};
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::field::{LoopCommand, ParticleField};
use crate::settings::{AnimationSettings, SettingsStore};
use crate::surface::{DrawList, FieldSurface};
use crate::theme::Theme;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

// ── Resources ────────────────────────────────────────────────────────────────

/// The single particle field owned by the app.
#[derive(Resource)]
pub struct ParticleFieldState(pub ParticleField);

/// The field's animation loop.  Its frame requests go through [`FrameQueue`].
#[derive(Resource, Default)]
pub struct FieldAnimation(pub AnimationLoop);

/// Draw calls of the most recent frame, consumed by the rendering systems.
#[derive(Resource, Default)]
pub struct FieldDrawList(pub DrawList);

// ── Messages ─────────────────────────────────────────────────────────────────

/// Pointer moved; viewport coordinates (origin top-left, y down).
#[derive(Message, Debug, Clone, Copy)]
pub struct PointerMoved {
    pub position: Vec2,
}

/// Primary pointer button pressed at a viewport position.
#[derive(Message, Debug, Clone, Copy)]
pub struct PointerClicked {
    pub position: Vec2,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct ViewportResized {
    pub width: f32,
    pub height: f32,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct ThemeChanged(pub Theme);

/// New settings requested by the user; persisted when applied.
#[derive(Message, Debug, Clone, Copy)]
pub struct SettingsChanged(pub AnimationSettings);

// ── Plugin ────────────────────────────────────────────────────────────────────

/// The field's `Update` chain.  Systems that write field messages run
/// `.before(FieldSystems)` so their messages apply the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSystems;

pub struct ParticleFieldPlugin;

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldConfig>()
            .init_resource::<SettingsStore>()
            .init_resource::<AnimationSettings>()
            .init_resource::<FieldAnimation>()
            .init_resource::<FrameQueue>()
            .init_resource::<FieldDrawList>()
            .insert_resource(ParticleFieldState(ParticleField::new(
                WINDOW_WIDTH as f32,
                WINDOW_HEIGHT as f32,
                AnimationSettings::default(),
                FieldConfig::default(),
            )))
            .add_message::<PointerMoved>()
            .add_message::<PointerClicked>()
            .add_message::<ViewportResized>()
            .add_message::<ThemeChanged>()
            .add_message::<SettingsChanged>()
            .add_systems(Startup, (load_field_config, setup_field_system).chain())
            .add_systems(
                Update,
                (
                    apply_viewport_messages_system,
                    apply_pointer_messages_system,
                    apply_theme_messages_system,
                    apply_settings_messages_system,
                    animation_frame_system,
                )
                    .chain()
                    .in_set(FieldSystems),
            );
    }
}

// ── Startup system ────────────────────────────────────────────────────────────

/// Build the field from the loaded config, the persisted settings and the
/// primary window size (the default window size when running headless), then
/// start the loop if particles are enabled.
pub fn setup_field_system(
    config: Res<FieldConfig>,
    store: Res<SettingsStore>,
    mut settings: ResMut<AnimationSettings>,
    mut field: ResMut<ParticleFieldState>,
    mut animation: ResMut<FieldAnimation>,
    mut queue: ResMut<FrameQueue>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    *settings = store.load(AnimationSettings::for_variant(config.variant));

    let (width, height) = match windows.single() {
        Ok(window) => (window.width(), window.height()),
        Err(_) => (WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
    };

    let theme = field.0.theme();
    field.0 = ParticleField::new(width, height, *settings, config.clone());
    field.0.set_theme(theme);

    if settings.runs_particles() {
        animation.0.start(&mut *queue);
        info!(
            "Particle field started: {} particles, tier {}",
            field.0.particles().len(),
            field.0.tier().label()
        );
    } else {
        info!("Particle field disabled by settings");
    }
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Only the last resize of a frame matters: each one rebuilds the field.
pub fn apply_viewport_messages_system(
    mut resizes: MessageReader<ViewportResized>,
    mut field: ResMut<ParticleFieldState>,
) {
    if let Some(last) = resizes.read().last() {
        field.0.resize(last.width, last.height);
    }
}

pub fn apply_pointer_messages_system(
    mut moves: MessageReader<PointerMoved>,
    mut clicks: MessageReader<PointerClicked>,
    animation: Res<FieldAnimation>,
    mut field: ResMut<ParticleFieldState>,
) {
    for moved in moves.read() {
        field.0.on_pointer_move(moved.position.x, moved.position.y);
    }

    // Bursts on a stopped field would sit frozen until the next start.
    let running = animation.0.is_running();
    for click in clicks.read() {
        if running {
            field.0.on_pointer_click(click.position.x, click.position.y);
        }
    }
}

pub fn apply_theme_messages_system(
    mut themes: MessageReader<ThemeChanged>,
    mut field: ResMut<ParticleFieldState>,
) {
    if let Some(ThemeChanged(theme)) = themes.read().last() {
        field.0.set_theme(*theme);
        debug!("Theme switched to {}", theme.name());
    }
}

#[allow(clippy::too_many_arguments)]
pub fn apply_settings_messages_system(
    mut changes: MessageReader<SettingsChanged>,
    store: Res<SettingsStore>,
    mut settings: ResMut<AnimationSettings>,
    mut field: ResMut<ParticleFieldState>,
    mut animation: ResMut<FieldAnimation>,
    mut queue: ResMut<FrameQueue>,
    mut draw_list: ResMut<FieldDrawList>,
) {
    for SettingsChanged(next) in changes.read() {
        *settings = *next;
        if let Err(e) = store.save(next) {
            warn!("{e}; settings kept for this session only");
        }

        match field.0.apply_settings(*next) {
            LoopCommand::Start => {
                animation.0.start(&mut *queue);
                info!("Particle animation started");
            }
            LoopCommand::Stop => {
                animation.0.stop(&mut *queue);
                draw_list.0.clear();
                info!("Particle animation stopped");
            }
            LoopCommand::Keep => {}
        }
    }
}

/// Run the frame the loop asked for, if any, and let it re-arm.
pub fn animation_frame_system(
    time: Res<Time>,
    mut queue: ResMut<FrameQueue>,
    mut animation: ResMut<FieldAnimation>,
    mut field: ResMut<ParticleFieldState>,
    mut draw_list: ResMut<FieldDrawList>,
) {
    let Some(handle) = queue.take_due() else {
        return;
    };

    animation.0.on_frame(
        handle,
        &mut field.0,
        &mut draw_list.0,
        time.delta(),
        &mut *queue,
    );
}
