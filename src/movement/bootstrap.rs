//! Movement domain: player bootstrap from the loaded tuning and level spawn.

use bevy::prelude::*;

use crate::movement::{MovementEvents, MovementTuning, Player, PlayerBody};

/// Where the player first appears. Written by the level loader.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerSpawnPoint(pub Vec2);

/// Spawn the player once the tuning and level are in place.
pub(crate) fn bootstrap_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    spawn_point: Res<PlayerSpawnPoint>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let body = match PlayerBody::spawn(spawn_point.0, &tuning) {
        Ok(body) => body,
        Err(errors) => {
            for e in &errors {
                error!("Movement tuning rejected: {}", e);
            }
            warn!("Spawning player with default movement tuning");
            let defaults = MovementTuning::default();
            let Ok(body) = PlayerBody::spawn(spawn_point.0, &defaults) else {
                error!("Default movement tuning is invalid, player not spawned");
                return;
            };
            commands.insert_resource(defaults);
            body
        }
    };

    let size = body.half_extents * 2.0;
    info!(
        "Spawning player at ({:.2}, {:.2}): size={:?}, max_speed={}, air_jumps={}, wall_jumps={}",
        body.position.x,
        body.position.y,
        size,
        tuning.max_speed,
        tuning.max_air_jumps,
        tuning.max_wall_jumps
    );

    commands.spawn((
        Player,
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(body.position.x, body.position.y, 1.0),
        body,
        MovementEvents::default(),
    ));
}
