//! Rendering of the particle field: pooled disc meshes, gizmo edges, stats.
//!
//! ## Layer Model
//!
//! | Layer            | Technology | z     | Source                      |
//! |------------------|------------|-------|-----------------------------|
//! | Glow halos       | `Mesh2d`   | 0.0   | `DiscCommand::glow`         |
//! | Particle discs   | `Mesh2d`   | 0.1   | `DiscCommand`               |
//! | Connective edges | Gizmos     | -     | `LineCommand`               |
//! | Stats overlay    | Bevy UI    | -     | `ParticleFieldState`        |
//!
//! ## Design
//!
//! The field records one frame into [`FieldDrawList`].  Discs are drawn by a
//! pool of entities sharing one unit-circle mesh ([`DiscMesh`]); each entity
//! owns its own [`ColorMaterial`] so its alpha can be set individually.  The
//! pool grows on demand and surplus entities are hidden, so the steady-state
//! frame spawns nothing.

use crate::constants::{DISC_MESH_SIDES, GLOW_ALPHA_FACTOR, STATS_FONT_SIZE};
use crate::plugin::{FieldDrawList, ParticleFieldState};
use bevy::color::Alpha;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

// ── Resources ────────────────────────────────────────────────────────────────

/// Shared unit-circle mesh used by every disc entity (created once at startup).
#[derive(Resource)]
pub struct DiscMesh(pub Handle<Mesh>);

/// Disc entities in spawn order, each with its own material.
#[derive(Resource, Default)]
pub struct DiscPool {
    entries: Vec<(Entity, Handle<ColorMaterial>)>,
}

// ── Components ───────────────────────────────────────────────────────────────

/// Marker for pooled disc entities.
#[derive(Component)]
pub struct FieldDisc;

/// Marker for the stats text root node.
#[derive(Component)]
pub struct FieldStatsDisplay;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct FieldRenderPlugin;

impl Plugin for FieldRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DiscPool>()
            .add_systems(Startup, (init_disc_mesh, setup_camera, setup_stats_text))
            .add_systems(
                PostUpdate,
                (sync_disc_pool_system, draw_connections_system, stats_display_system),
            );
    }
}

// ── Coordinates ───────────────────────────────────────────────────────────────

/// Convert viewport pixels (origin top-left, y down) to 2D world coordinates
/// of a default `Camera2d` (origin centre, y up).
pub fn viewport_to_world(point: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(point.x - viewport.x * 0.5, viewport.y * 0.5 - point.y)
}

// ── Startup systems ───────────────────────────────────────────────────────────

/// Create the shared circle mesh and store it as a [`DiscMesh`] resource.
fn init_disc_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(unit_disc_mesh(DISC_MESH_SIDES));
    commands.insert_resource(DiscMesh(handle));
}

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel.
    commands.spawn(Camera2d);
}

pub fn setup_stats_text(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            FieldStatsDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: - | Tier: high | Ambient: 0 | Transient: 0"),
                TextFont {
                    font_size: STATS_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
            ));
        });
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Mirror the recorded discs onto the entity pool: a halo and a core entity
/// per disc, surplus entities hidden.
pub fn sync_disc_pool_system(
    mut commands: Commands,
    disc_mesh: Option<Res<DiscMesh>>,
    draw_list: Res<FieldDrawList>,
    field: Res<ParticleFieldState>,
    mut pool: ResMut<DiscPool>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut discs: Query<(&mut Transform, &mut Visibility), With<FieldDisc>>,
) {
    let Some(disc_mesh) = disc_mesh else {
        return;
    };
    let viewport = field.0.viewport();
    let needed = draw_list.0.discs.len() * 2;

    while pool.entries.len() < needed {
        let material = materials.add(ColorMaterial::from_color(Color::NONE));
        let entity = commands
            .spawn((
                FieldDisc,
                Mesh2d(disc_mesh.0.clone()),
                MeshMaterial2d(material.clone()),
                Transform::default(),
                Visibility::Hidden,
            ))
            .id();
        pool.entries.push((entity, material));
    }

    for (slot, (entity, material)) in pool.entries.iter().enumerate() {
        let placement = draw_list.0.discs.get(slot / 2).map(|disc| {
            let is_halo = slot % 2 == 0;
            let (radius, alpha, z) = if is_halo {
                (disc.radius + disc.glow, disc.alpha * GLOW_ALPHA_FACTOR, 0.0)
            } else {
                (disc.radius, disc.alpha, 0.1)
            };
            let center = viewport_to_world(disc.center, viewport);
            (
                Transform::from_translation(center.extend(z)).with_scale(Vec3::splat(radius)),
                disc.color.with_alpha(alpha),
            )
        });

        if let Some(mat) = materials.get_mut(material) {
            if let Some((_, color)) = placement {
                mat.color = color;
            }
        }

        // Entities spawned this frame only exist once commands are applied.
        let Ok((mut transform, mut visibility)) = discs.get_mut(*entity) else {
            continue;
        };
        match placement {
            Some((placed, _)) => {
                *transform = placed;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

pub fn draw_connections_system(
    mut gizmos: Gizmos,
    draw_list: Res<FieldDrawList>,
    field: Res<ParticleFieldState>,
) {
    let viewport = field.0.viewport();
    for line in &draw_list.0.lines {
        gizmos.line_2d(
            viewport_to_world(line.from, viewport),
            viewport_to_world(line.to, viewport),
            line.color.with_alpha(line.alpha),
        );
    }
}

pub fn stats_display_system(
    field: Res<ParticleFieldState>,
    parent_query: Query<&Children, With<FieldStatsDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let field = &field.0;
    let fps = field
        .fps()
        .map(|fps| fps.to_string())
        .unwrap_or_else(|| "-".to_string());

    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!(
                    "FPS: {} | Tier: {} | Ambient: {} | Transient: {} | Theme: {}",
                    fps,
                    field.tier().label(),
                    field.ambient_count(),
                    field.transient_count(),
                    field.theme().name()
                ));
            }
        }
    }
}

// ── Mesh helper ───────────────────────────────────────────────────────────────

/// Unit disc as a triangle fan: vertex 0 is the centre, vertices `1..=sides`
/// lie on the rim.  Scaled per entity to the disc radius.
fn unit_disc_mesh(sides: u32) -> Mesh {
    let rim: Vec<Vec2> = (0..sides)
        .map(|i| Vec2::from_angle(std::f32::consts::TAU * i as f32 / sides as f32))
        .collect();

    let positions: Vec<[f32; 3]> = std::iter::once(Vec2::ZERO)
        .chain(rim.iter().copied())
        .map(|p| [p.x, p.y, 0.0])
        .collect();
    let uvs: Vec<[f32; 2]> = std::iter::once(Vec2::ZERO)
        .chain(rim.iter().copied())
        .map(|p| [0.5 + p.x * 0.5, 0.5 - p.y * 0.5])
        .collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; positions.len()];
    let indices: Vec<u32> = (1..=sides)
        .flat_map(|i| [0, i, i % sides + 1])
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}
