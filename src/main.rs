use bevy::prelude::*;
use bevy::window::WindowResolution;
use std::env;

use particle_field::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use particle_field::input::FieldInputPlugin;
use particle_field::plugin::ThemeChanged;
use particle_field::rendering::FieldRenderPlugin;
use particle_field::theme::Theme;
use particle_field::ParticleFieldPlugin;

/// Push the theme named by `PARTICLE_THEME` once the field exists.
fn apply_startup_theme(mut themes: MessageWriter<ThemeChanged>) {
    if let Ok(name) = env::var("PARTICLE_THEME") {
        themes.write(ThemeChanged(Theme::from_name(&name)));
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Particle Field".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.04, 0.03, 0.08)))
        .add_plugins((ParticleFieldPlugin, FieldInputPlugin, FieldRenderPlugin))
        .add_systems(Startup, apply_startup_theme)
        .run();
}
