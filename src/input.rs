//! Maps window, mouse and keyboard input onto particle-field messages.
//!
//! ## Key bindings
//!
//! | Key       | Effect                                         |
//! |-----------|------------------------------------------------|
//! | `T`       | Cycle the display theme                        |
//! | `P`       | Toggle the animation on/off (persisted)        |
//! | `1` `2` `3` | Performance setting high / medium / low     |
//! | `+` / `-` | Raise / lower the particle count               |

use crate::constants::PARTICLE_COUNT_STEP;
use crate::plugin::{
    FieldSystems, ParticleFieldState, PointerClicked, PointerMoved, SettingsChanged,
    ThemeChanged, ViewportResized,
};
use crate::settings::AnimationSettings;
use crate::tier::PerformanceTier;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};

pub struct FieldInputPlugin;

impl Plugin for FieldInputPlugin {
    fn build(&self, app: &mut App) {
        // `ButtonInput` is settled once `PreUpdate` is done, so a press is
        // seen in exactly one frame.
        app.add_systems(
            Update,
            (
                forward_cursor_system,
                forward_click_system,
                forward_resize_system,
                keyboard_settings_system,
            )
                .before(FieldSystems),
        );
    }
}

/// Bevy cursor positions already use the top-left origin of the viewport.
pub fn forward_cursor_system(
    mut cursor: MessageReader<CursorMoved>,
    mut moved: MessageWriter<PointerMoved>,
) {
    if let Some(last) = cursor.read().last() {
        moved.write(PointerMoved {
            position: last.position,
        });
    }
}

pub fn forward_click_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut clicked: MessageWriter<PointerClicked>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(position) = window.cursor_position() {
        clicked.write(PointerClicked { position });
    }
}

pub fn forward_resize_system(
    mut resized: MessageReader<WindowResized>,
    mut viewport: MessageWriter<ViewportResized>,
) {
    if let Some(last) = resized.read().last() {
        viewport.write(ViewportResized {
            width: last.width,
            height: last.height,
        });
    }
}

pub fn keyboard_settings_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<AnimationSettings>,
    field: Res<ParticleFieldState>,
    mut themes: MessageWriter<ThemeChanged>,
    mut changes: MessageWriter<SettingsChanged>,
) {
    if keys.just_pressed(KeyCode::KeyT) {
        themes.write(ThemeChanged(field.0.theme().next()));
    }

    if let Some(next) = settings_for_keys(&keys, *settings) {
        changes.write(SettingsChanged(next));
    }
}

/// Settings after this frame's key presses, or `None` when nothing changed.
fn settings_for_keys(
    keys: &ButtonInput<KeyCode>,
    current: AnimationSettings,
) -> Option<AnimationSettings> {
    let mut next = current;

    if keys.just_pressed(KeyCode::KeyP) {
        next = next.toggled();
    }

    if keys.just_pressed(KeyCode::Digit1) {
        next.performance = PerformanceTier::High;
    } else if keys.just_pressed(KeyCode::Digit2) {
        next.performance = PerformanceTier::Medium;
    } else if keys.just_pressed(KeyCode::Digit3) {
        next.performance = PerformanceTier::Low;
    }

    if keys.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        next.particle_count = next.particle_count.saturating_add(PARTICLE_COUNT_STEP);
    }
    if keys.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        next.particle_count = next
            .particle_count
            .saturating_sub(PARTICLE_COUNT_STEP)
            .max(PARTICLE_COUNT_STEP);
    }

    (next != current).then_some(next)
}
