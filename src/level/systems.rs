//! Level spawning: static colliders, trigger zones and the shared level mask.

use avian2d::prelude::*;
use bevy::math::bounding::{Aabb2d, BoundingVolume};
use bevy::prelude::*;

use super::grid::LevelGrid;
use super::triggers::{CheckpointZone, HazardZone, KillPlane};
use crate::content::LevelLayout;
use crate::movement::{GameLayer, MovementTuning, PlayerSpawnPoint};

/// Solid level geometry.
#[derive(Component, Debug)]
pub struct Solid;

/// Solids sit on the only layer the movement rays query.
pub(crate) fn solid_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Ground, [GameLayer::Player])
}

pub(crate) fn sensor_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player])
}

pub(crate) fn spawn_level(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    tuning: Res<MovementTuning>,
    mut spawn_point: ResMut<PlayerSpawnPoint>,
) {
    let grid = match LevelGrid::from_layout(&layout) {
        Ok(grid) => grid,
        Err(errors) => {
            for e in &errors {
                error!("Level layout rejected: {}", e);
            }
            warn!("Using built-in level layout");
            match LevelGrid::from_layout(&LevelLayout::default()) {
                Ok(grid) => grid,
                Err(_) => {
                    error!("Built-in level layout is invalid, no level spawned");
                    return;
                }
            }
        }
    };

    let solid_color = Color::srgb(0.4, 0.5, 0.4);
    let hazard_color = Color::srgb(0.8, 0.25, 0.2);
    let checkpoint_color = Color::srgba(0.9, 0.8, 0.3, 0.6);

    let solid_layers = solid_layers();
    let sensor_layers = sensor_layers();

    for solid in &grid.solids {
        let (size, center) = size_and_center(solid);
        commands.spawn((
            Solid,
            Sprite {
                color: solid_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            solid_layers,
        ));
    }

    for hazard in &grid.hazards {
        let (size, center) = size_and_center(hazard);
        commands.spawn((
            HazardZone { bounds: *hazard },
            Sprite {
                color: hazard_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Sensor,
            sensor_layers,
        ));
    }

    for checkpoint in &grid.checkpoints {
        let (size, center) = size_and_center(checkpoint);
        commands.spawn((
            CheckpointZone::new(*checkpoint),
            Sprite {
                color: checkpoint_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, -0.5),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            Sensor,
            sensor_layers,
        ));
    }

    spawn_point.0 = grid.spawn_ground + Vec2::new(0.0, tuning.half_height);
    commands.insert_resource(grid.mask());
    commands.insert_resource(KillPlane(grid.kill_plane_y));

    info!(
        "Level spawned: {} solids, {} hazards, {} checkpoints, spawn at ({:.2}, {:.2}), kill plane y={}",
        grid.solids.len(),
        grid.hazards.len(),
        grid.checkpoints.len(),
        spawn_point.0.x,
        spawn_point.0.y,
        grid.kill_plane_y
    );
}

fn size_and_center(bounds: &Aabb2d) -> (Vec2, Vec2) {
    (bounds.half_size() * 2.0, bounds.center())
}
